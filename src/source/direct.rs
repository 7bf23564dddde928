// src/source/direct.rs
use async_trait::async_trait;
use reqwest::Client;

use crate::config::options::SourceOptions;
use crate::core::net;
use crate::error::ScrapeError;

use super::HtmlSource;

/// Plain GET of the market page.
pub struct DirectSource {
    client: Client,
    url: String,
}

impl DirectSource {
    pub fn new(opts: &SourceOptions) -> Result<Self, ScrapeError> {
        Ok(Self { client: net::client(opts.navigation_timeout)?, url: opts.url.clone() })
    }
}

#[async_trait]
impl HtmlSource for DirectSource {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn fetch_market_html(&self) -> Result<String, ScrapeError> {
        net::http_get(&self.client, &self.url).await
    }
}
