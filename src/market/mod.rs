// src/market/mod.rs
//! Market data shapes shared by the collector, the projector and the server.
//!
//! `MarketSnapshot` is also the wire format of `GET /scrape`:
//! `{ "goldCap": number|null, "bitcoinCap": number|null }`.

use serde::{Deserialize, Serialize};

pub mod cache;
pub mod cap;

pub use cache::{MemoryCache, SnapshotCache};
pub use cap::{parse_cap, usable};

/// Two market caps in USD. Produced fresh every cycle; either side may be missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub gold_cap: Option<f64>,
    pub bitcoin_cap: Option<f64>,
}

impl MarketSnapshot {
    pub const EMPTY: Self = Self { gold_cap: None, bitcoin_cap: None };

    pub fn new(gold_cap: Option<f64>, bitcoin_cap: Option<f64>) -> Self {
        Self { gold_cap, bitcoin_cap }
    }

    /// Both sides present and usable (finite, non-zero).
    pub fn is_complete(&self) -> bool {
        usable(self.gold_cap).is_some() && usable(self.bitcoin_cap).is_some()
    }

    pub fn is_empty(&self) -> bool {
        usable(self.gold_cap).is_none() && usable(self.bitcoin_cap).is_none()
    }

    /// The snapshot with unusable values (NaN, zero, infinities) dropped.
    pub fn guarded(self) -> Self {
        Self { gold_cap: usable(self.gold_cap), bitcoin_cap: usable(self.bitcoin_cap) }
    }

    /// Bitcoin at or above gold. Needs both sides.
    pub fn bitcoin_ahead(&self) -> bool {
        match (usable(self.gold_cap), usable(self.bitcoin_cap)) {
            (Some(g), Some(b)) => b >= g,
            _ => false,
        }
    }
}

/// Body of `GET /scrape`: a snapshot, or `{ "error": "..." }` on hard failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeReply {
    Failed { error: String },
    Snapshot(MarketSnapshot),
}
