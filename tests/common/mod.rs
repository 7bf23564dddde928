// tests/common/mod.rs
//
// Scripted HtmlSource shared by the collector, poll and server tests.
//
#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use goldcross::config::options::FallbackPolicy;
use goldcross::error::ScrapeError;
use goldcross::market::{MemoryCache, SnapshotCache};
use goldcross::scrape::Collector;
use goldcross::source::{HtmlSource, Upstream};

pub enum Step {
    Page(String),
    Fail(ScrapeError),
    /// Sleep, then serve the page.
    Slow(Duration, String),
}

/// Replays `steps` in order; repeats the last one once the script runs out.
pub struct Scripted {
    steps: Mutex<VecDeque<Step>>,
    last: Mutex<Option<String>>,
    pub calls: AtomicUsize,
}

impl Scripted {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self { steps: Mutex::new(steps.into()), last: Mutex::new(None), calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HtmlSource for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_market_html(&self) -> Result<String, ScrapeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Page(html)) => {
                *self.last.lock().unwrap() = Some(html.clone());
                Ok(html)
            }
            Some(Step::Fail(e)) => Err(e),
            Some(Step::Slow(d, html)) => {
                tokio::time::sleep(d).await;
                Ok(html)
            }
            None => match self.last.lock().unwrap().clone() {
                Some(html) => Ok(html),
                None => Err(ScrapeError::Transport("script exhausted".into())),
            },
        }
    }
}

/// A minimal market table; `None` leaves the row out.
pub fn page(gold: Option<&str>, bitcoin: Option<&str>) -> String {
    let mut rows = String::new();
    if let Some(cap) = gold {
        rows.push_str(&format!("<tr><td>1</td><td><a href=\"/gold\">Gold</a></td><td>{cap}</td></tr>"));
    }
    if let Some(cap) = bitcoin {
        rows.push_str(&format!("<tr><td>2</td><td><a href=\"/btc\">Bitcoin</a></td><td>{cap}</td></tr>"));
    }
    format!("<html><body><table><tbody>{rows}</tbody></table></body></html>")
}

pub fn down() -> ScrapeError {
    ScrapeError::Transport("connection refused".into())
}

pub fn collector(
    src: &Arc<Scripted>,
    cache: Arc<MemoryCache>,
    policy: FallbackPolicy,
) -> Arc<Collector> {
    let cache: Arc<dyn SnapshotCache> = cache;
    Arc::new(Collector::new(Upstream::from(Arc::clone(src)), cache, policy))
}
