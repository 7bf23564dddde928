// src/core/net.rs
// HTTP GET over reqwest (rustls). One shared client per source.

use std::time::Duration;

use reqwest::{Client, header};

use crate::config::consts::USER_AGENT;
use crate::error::ScrapeError;

pub fn client(timeout: Duration) -> Result<Client, ScrapeError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
        .map_err(|e| ScrapeError::Transport(format!("client setup: {e}")))
}

/// GET `url` and return the body as text. Non-2xx is an error.
pub async fn http_get(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let resp = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8")
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::Status { status: status.as_u16(), url: s!(url) });
    }
    Ok(resp.text().await?)
}
