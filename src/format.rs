// src/format.rs
// Display strings for the three fields (gold cap, bitcoin cap, countdown).

use crate::market::{MarketSnapshot, usable};
use crate::projection::{CrossoverDuration, GrowthModel};
use crate::scrape::Collected;

pub const ERROR: &str = "Error";
pub const FETCH_ERROR: &str = "Error fetching data";
pub const CALCULATING: &str = "Calculating...";
pub const LOADING: &str = "Loading...";
pub const OVERTAKEN: &str = "Bitcoin has overtaken Gold!";
pub const CACHED_TAG: &str = "(cached)";

/// Whole-dollar USD with `,` grouping. Missing, zero or NaN renders `Error`.
pub fn format_usd(value: Option<f64>) -> String {
    let Some(v) = usable(value) else {
        return s!(ERROR);
    };
    let rounded = v.abs().round();
    let sign = if v < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&format!("{rounded:.0}")))
}

/// `None` → "Calculating...", zero → overtaken message, else `1y 2m 3d 4h 5m 6s`.
pub fn format_countdown(time: Option<&CrossoverDuration>) -> String {
    match time {
        None => s!(CALCULATING),
        Some(t) if t.is_zero() => s!(OVERTAKEN),
        Some(t) => format!(
            "{}y {}m {}d {}h {}m {}s",
            t.years, t.months, t.days, t.hours, t.minutes, t.seconds
        ),
    }
}

fn group_thousands(digits: &str) -> String {
    let n = digits.len();
    let mut out = String::with_capacity(n + n / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Where the numbers on screen came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    /// No cycle has finished yet.
    Pending,
    Fresh,
    /// Last complete snapshot, shown because this cycle failed.
    Cached,
    /// This cycle parsed only part of the page (or nothing).
    Partial,
    /// Hard failure with nothing to show.
    Failed,
}

/// Everything a display sink renders for one cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub gold: String,
    pub bitcoin: String,
    pub countdown: String,
    pub freshness: Freshness,
    /// Values behind the strings; what the stop test looks at.
    pub snapshot: MarketSnapshot,
    /// Failure that forced a fallback, if any.
    pub note: Option<String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            gold: s!(LOADING),
            bitcoin: s!(LOADING),
            countdown: s!(CALCULATING),
            freshness: Freshness::Pending,
            snapshot: MarketSnapshot::EMPTY,
            note: None,
        }
    }
}

impl Dashboard {
    pub fn build(collected: &Collected, model: &GrowthModel) -> Self {
        match collected {
            Collected::Fresh(snap) => Self {
                gold: format_usd(snap.gold_cap),
                bitcoin: format_usd(snap.bitcoin_cap),
                countdown: countdown_for(snap, model),
                freshness: Freshness::Fresh,
                snapshot: *snap,
                note: None,
            },
            Collected::Stale { cached, reason } => Self {
                gold: cached_usd(cached.gold_cap),
                bitcoin: cached_usd(cached.bitcoin_cap),
                countdown: countdown_for(cached, model),
                freshness: Freshness::Cached,
                snapshot: *cached,
                note: Some(reason.clone()),
            },
            Collected::Partial { snapshot, reason } => Self {
                gold: format_usd(snapshot.gold_cap),
                bitcoin: format_usd(snapshot.bitcoin_cap),
                countdown: countdown_for(snapshot, model),
                freshness: Freshness::Partial,
                snapshot: *snapshot,
                note: Some(reason.clone()),
            },
            Collected::Failed { reason } => Self {
                gold: s!(FETCH_ERROR),
                bitcoin: s!(FETCH_ERROR),
                countdown: s!(ERROR),
                freshness: Freshness::Failed,
                snapshot: MarketSnapshot::EMPTY,
                note: Some(reason.clone()),
            },
        }
    }

    /// Terminal state: a fresh cycle saw bitcoin at or above gold.
    pub fn is_overtaken(&self) -> bool {
        self.freshness == Freshness::Fresh && self.snapshot.bitcoin_ahead()
    }
}

fn cached_usd(v: Option<f64>) -> String {
    format!("{} {CACHED_TAG}", format_usd(v))
}

/// Countdown only makes sense with both sides; otherwise it's an error state.
fn countdown_for(snap: &MarketSnapshot, model: &GrowthModel) -> String {
    if !snap.is_complete() {
        return s!(ERROR);
    }
    format_countdown(model.project(snap.gold_cap, snap.bitcoin_cap).as_ref())
}
