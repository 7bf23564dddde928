// src/config/options.rs
use std::{fmt, str::FromStr, time::Duration};

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub poll: PollOptions,
    pub fallback: FallbackPolicy,
    pub serve: ServeOptions,
}

/// How the market page is obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Plain GET of the page.
    #[default]
    Direct,
    /// GET through a URL-rewriting proxy.
    Proxy,
    /// Headless browser render, DOM dumped after scripts settle.
    Headless,
    /// JSON from a running `serve` instance.
    Api,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Direct => "direct",
            SourceKind::Proxy => "proxy",
            SourceKind::Headless => "headless",
            SourceKind::Api => "api",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(SourceKind::Direct),
            "proxy" => Ok(SourceKind::Proxy),
            "headless" | "browser" => Ok(SourceKind::Headless),
            "api" | "server" => Ok(SourceKind::Api),
            other => Err(format!("Unknown source: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub kind: SourceKind,
    /// Market page URL (or the `/scrape` endpoint for `SourceKind::Api`).
    pub url: String,
    /// Proxy URL with a `{url}` placeholder for the percent-encoded target.
    pub proxy_template: String,
    pub browser: String,
    pub navigation_timeout: Duration,
    pub element_timeout: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            kind: SourceKind::Direct,
            url: s!(SOURCE_URL),
            proxy_template: s!(PROXY_TEMPLATE),
            browser: s!(BROWSER_BIN),
            navigation_timeout: NAVIGATION_TIMEOUT,
            element_timeout: ELEMENT_TIMEOUT,
        }
    }
}

impl SourceOptions {
    /// Default target for a given kind: the api endpoint for `Api`, the market page otherwise.
    pub fn default_url_for(kind: SourceKind) -> &'static str {
        match kind {
            SourceKind::Api => API_URL,
            _ => SOURCE_URL,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    /// Upper bound on one collect step; distinct from the interval.
    pub fetch_timeout: Duration,
    /// Stop after this many cycles (None = until overtaken or cancelled).
    pub max_cycles: Option<u64>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            fetch_timeout: NAVIGATION_TIMEOUT + ELEMENT_TIMEOUT,
            max_cycles: None,
        }
    }
}

/// What a failed or partial cycle reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Serve the last complete snapshot, marked stale.
    #[default]
    Cache,
    /// Report whatever parsed (possibly nothing).
    Null,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cache" | "cached" => Ok(FallbackPolicy::Cache),
            "null" | "none" => Ok(FallbackPolicy::Null),
            other => Err(format!("Unknown fallback policy: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServeOptions {
    pub bind: String,
    pub fallback: FallbackPolicy,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self { bind: s!(BIND_ADDR), fallback: FallbackPolicy::Null }
    }
}

impl AppOptions {
    /// Defaults overridden by `GOLDCROSS_*` environment variables (GUI has no flags).
    pub fn from_env() -> Self {
        Self::from_vars(|k| std::env::var(k).ok())
    }

    /// `from_env` over any variable lookup. Blank values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut opts = Self::default();
        let var = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        if let Some(kind) = var("GOLDCROSS_SOURCE").and_then(|v| v.parse().ok()) {
            opts.source.kind = kind;
            opts.source.url = s!(SourceOptions::default_url_for(kind));
        }
        if let Some(url) = var("GOLDCROSS_URL") {
            opts.source.url = url;
        }
        if let Some(t) = var("GOLDCROSS_PROXY") {
            opts.source.proxy_template = t;
        }
        if let Some(b) = var("GOLDCROSS_BROWSER") {
            opts.source.browser = b;
        }
        if let Some(secs) = var("GOLDCROSS_INTERVAL").and_then(|v| v.parse::<u64>().ok()) {
            opts.poll.interval = Duration::from_secs(secs.max(1));
        }
        if let Some(secs) = var("GOLDCROSS_FETCH_TIMEOUT").and_then(|v| v.parse::<u64>().ok()) {
            opts.poll.fetch_timeout = Duration::from_secs(secs.max(1));
        }
        if let Some(p) = var("GOLDCROSS_FALLBACK").and_then(|v| v.parse().ok()) {
            opts.fallback = p;
        }
        opts
    }
}
