// src/source/mod.rs
//! Where the market page comes from.
//!
//! Three interchangeable ways to get the HTML (`HtmlSource`), plus the JSON api of a
//! running `serve` instance. The collector only sees `Upstream`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::options::{SourceKind, SourceOptions};
use crate::error::ScrapeError;

pub mod api;
pub mod direct;
pub mod headless;
pub mod proxy;

pub use api::ApiSource;
pub use direct::DirectSource;
pub use headless::HeadlessSource;
pub use proxy::ProxySource;

/// Anything that can hand back the market page as an HTML string.
#[async_trait]
pub trait HtmlSource: Send + Sync {
    /// Short label for logs and the status line.
    fn name(&self) -> &'static str;

    async fn fetch_market_html(&self) -> Result<String, ScrapeError>;
}

/// What the collector pulls from.
#[derive(Clone)]
pub enum Upstream {
    Html(Arc<dyn HtmlSource>),
    Api(Arc<ApiSource>),
}

impl Upstream {
    pub fn name(&self) -> &'static str {
        match self {
            Upstream::Html(s) => s.name(),
            Upstream::Api(_) => "api",
        }
    }

    /// Wire up the configured strategy.
    pub fn from_options(opts: &SourceOptions) -> Result<Self, ScrapeError> {
        logd!("Source: kind={} url={}", opts.kind, opts.url);
        Ok(match opts.kind {
            SourceKind::Direct => Upstream::Html(Arc::new(DirectSource::new(opts)?)),
            SourceKind::Proxy => Upstream::Html(Arc::new(ProxySource::new(opts)?)),
            SourceKind::Headless => Upstream::Html(Arc::new(HeadlessSource::new(opts))),
            SourceKind::Api => Upstream::Api(Arc::new(ApiSource::new(opts)?)),
        })
    }
}

impl<S: HtmlSource + 'static> From<Arc<S>> for Upstream {
    fn from(src: Arc<S>) -> Self {
        Upstream::Html(src)
    }
}
