// src/scrape.rs
// One collect cycle: upstream → extract → parse → (cache | fallback).
// Never errors; every failure class ends up as a `Collected` variant.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    config::options::FallbackPolicy,
    error::ScrapeError,
    market::{MarketSnapshot, SnapshotCache, parse_cap, usable},
    source::Upstream,
    specs::assets,
};

/// Result of one collect cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum Collected {
    /// Both values parsed from this cycle's page.
    Fresh(MarketSnapshot),
    /// This cycle failed or was partial; showing the last complete snapshot.
    Stale { cached: MarketSnapshot, reason: String },
    /// Page fetched, but not both values came out of it.
    Partial { snapshot: MarketSnapshot, reason: String },
    /// Nothing fetched and nothing cached.
    Failed { reason: String },
}

impl Collected {
    /// The `{goldCap, bitcoinCap}` pair this cycle reports.
    pub fn snapshot(&self) -> MarketSnapshot {
        match self {
            Collected::Fresh(s) => *s,
            Collected::Stale { cached, .. } => *cached,
            Collected::Partial { snapshot, .. } => *snapshot,
            Collected::Failed { .. } => MarketSnapshot::EMPTY,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Collected::Fresh(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Collected::Fresh(_) => None,
            Collected::Stale { reason, .. }
            | Collected::Partial { reason, .. }
            | Collected::Failed { reason } => Some(reason),
        }
    }
}

pub struct Collector {
    upstream: Upstream,
    cache: Arc<dyn SnapshotCache>,
    policy: FallbackPolicy,
    // one cycle at a time, even when the server gets concurrent requests
    gate: Mutex<()>,
}

impl Collector {
    pub fn new(upstream: Upstream, cache: Arc<dyn SnapshotCache>, policy: FallbackPolicy) -> Self {
        Self { upstream, cache, policy, gate: Mutex::new(()) }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn source_name(&self) -> &'static str {
        self.upstream.name()
    }

    /// Single attempt, no retry. Updates the cache on a complete snapshot.
    pub async fn collect(&self) -> Collected {
        let _cycle = self.gate.lock().await;
        let result = self.fetch_fresh().await;
        self.settle(result)
    }

    /// `collect`, bounded. Overrunning `limit` is a failure for this cycle.
    pub async fn collect_within(&self, limit: Duration) -> Collected {
        let _cycle = self.gate.lock().await;
        let result = match tokio::time::timeout(limit, self.fetch_fresh()).await {
            Ok(r) => r,
            Err(_) => Err(ScrapeError::Timeout(limit, "market data")),
        };
        self.settle(result)
    }

    fn settle(&self, result: Result<MarketSnapshot, ScrapeError>) -> Collected {
        match result {
            Ok(snap) if snap.is_complete() => {
                self.cache.put_if_complete(&snap);
                logd!("Fetch: {} ok gold={:?} bitcoin={:?}", self.source_name(), snap.gold_cap, snap.bitcoin_cap);
                Collected::Fresh(snap)
            }
            Ok(snap) => {
                let reason = partial_reason(&snap);
                logw!("Fetch: {} partial ({reason})", self.source_name());
                self.fallback(Some(snap), reason)
            }
            Err(e) => {
                loge!("Fetch: {} failed [{:?}]: {e}", self.source_name(), e.class());
                self.fallback(None, e.to_string())
            }
        }
    }

    /// What a non-fresh cycle shows under the configured policy.
    /// Cached values replace the whole pair; fresh and cached are never mixed.
    pub fn fallback(&self, partial: Option<MarketSnapshot>, reason: String) -> Collected {
        if self.policy == FallbackPolicy::Cache {
            if let Some(cached) = self.cache.last_valid() {
                logf!("Fetch: serving cached snapshot ({reason})");
                return Collected::Stale { cached, reason };
            }
        }
        match partial {
            Some(snapshot) => Collected::Partial { snapshot, reason },
            None => Collected::Failed { reason },
        }
    }

    async fn fetch_fresh(&self) -> Result<MarketSnapshot, ScrapeError> {
        match &self.upstream {
            Upstream::Html(src) => {
                let html = src.fetch_market_html().await?;
                snapshot_from_html(&html)
            }
            Upstream::Api(api) => Ok(api.fetch_snapshot().await?.guarded()),
        }
    }
}

/// Extract + parse + guard. A page without any table is a structural failure;
/// a table without the rows just leaves fields empty.
pub fn snapshot_from_html(html: &str) -> Result<MarketSnapshot, ScrapeError> {
    if !assets::has_table(html) {
        return Err(ScrapeError::Structure(s!("no <table> in page")));
    }
    let texts = assets::extract(html);

    let gold = parse_field("gold", texts.gold.as_deref());
    let bitcoin = parse_field("bitcoin", texts.bitcoin.as_deref());
    Ok(MarketSnapshot::new(gold, bitcoin))
}

fn parse_field(label: &str, text: Option<&str>) -> Option<f64> {
    let raw = parse_cap(text);
    let value = usable(raw);
    if let (Some(t), None) = (text, value) {
        let e = ScrapeError::Parse(format!("{label} cap {t:?} is not a number"));
        logw!("Extract: [{:?}] {e}", e.class());
    }
    value
}

fn partial_reason(snap: &MarketSnapshot) -> String {
    match (snap.gold_cap, snap.bitcoin_cap) {
        (None, None) => s!("gold and bitcoin not found"),
        (None, _) => s!("gold not found"),
        _ => s!("bitcoin not found"),
    }
}
