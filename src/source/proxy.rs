// src/source/proxy.rs
use async_trait::async_trait;
use reqwest::Client;
use url::form_urlencoded;

use crate::config::options::SourceOptions;
use crate::core::net;
use crate::error::ScrapeError;

use super::HtmlSource;

const PLACEHOLDER: &str = "{url}";

/// GET through a URL-rewriting proxy such as `https://proxy.example/raw?url={url}`.
pub struct ProxySource {
    client: Client,
    request_url: String,
}

impl ProxySource {
    pub fn new(opts: &SourceOptions) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: net::client(opts.navigation_timeout)?,
            request_url: proxied_url(&opts.proxy_template, &opts.url),
        })
    }

    pub fn request_url(&self) -> &str {
        &self.request_url
    }
}

/// Substitute the percent-encoded target into the template.
/// A template without `{url}` gets the target appended.
pub fn proxied_url(template: &str, target: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
    if template.contains(PLACEHOLDER) {
        template.replace(PLACEHOLDER, &encoded)
    } else {
        format!("{template}{encoded}")
    }
}

#[async_trait]
impl HtmlSource for ProxySource {
    fn name(&self) -> &'static str {
        "proxy"
    }

    async fn fetch_market_html(&self) -> Result<String, ScrapeError> {
        net::http_get(&self.client, &self.request_url).await
    }
}
