// src/source/api.rs
// Client side of `GET /scrape`: the server does the scraping, we get JSON.

use reqwest::Client;

use crate::config::options::SourceOptions;
use crate::core::net;
use crate::error::ScrapeError;
use crate::market::{MarketSnapshot, ScrapeReply};

pub struct ApiSource {
    client: Client,
    url: String,
}

impl ApiSource {
    pub fn new(opts: &SourceOptions) -> Result<Self, ScrapeError> {
        Ok(Self { client: net::client(opts.navigation_timeout)?, url: opts.url.clone() })
    }

    /// Fetch a snapshot. A 500 `{error}` body (or any non-2xx) is a transport failure.
    /// Reads the body before checking status since error bodies carry the message.
    pub async fn fetch_snapshot(&self) -> Result<MarketSnapshot, ScrapeError> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        match serde_json::from_str::<ScrapeReply>(&body) {
            Ok(ScrapeReply::Failed { error }) => {
                Err(ScrapeError::Transport(format!("server error ({status}): {error}")))
            }
            Ok(ScrapeReply::Snapshot(_)) | Err(_) if !status.is_success() => {
                Err(ScrapeError::Status { status: status.as_u16(), url: self.url.clone() })
            }
            Ok(ScrapeReply::Snapshot(snap)) => Ok(snap),
            Err(e) => Err(ScrapeError::Parse(format!("bad /scrape body: {e}"))),
        }
    }
}
