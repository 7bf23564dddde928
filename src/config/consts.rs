// src/config/consts.rs
use std::time::Duration;

// Source page
pub const SOURCE_URL: &str = "https://companiesmarketcap.com/assets-by-market-cap/";
pub const PROXY_TEMPLATE: &str = "https://api.allorigins.win/raw?url={url}";
pub const API_URL: &str = "http://localhost:3000/scrape";
pub const BROWSER_BIN: &str = "chromium";
pub const USER_AGENT: &str = concat!("goldcross/", env!("CARGO_PKG_VERSION"));

// Asset name substrings (matched against lowercased name cells)
pub const GOLD_NEEDLE: &str = "gold";
pub const BITCOIN_NEEDLE: &str = "bitcoin";

// Growth model (simplified constant-rate compounding)
pub const BITCOIN_GROWTH_RATE: f64 = 0.5;
pub const GOLD_GROWTH_RATE: f64 = 0.05;
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

// Timeouts
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
pub const ELEMENT_TIMEOUT: Duration = Duration::from_secs(5);

// Polling
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

// Server
pub const BIND_ADDR: &str = "127.0.0.1:3000";

// Local state
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
