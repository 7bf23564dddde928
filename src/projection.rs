// src/projection.rs
// Time until bitcoin's cap catches gold's, under constant compounding.
//
//   years = ln(gold / bitcoin) / ln(1 + (fast - slow))
//
// Calendar model: 365-day year, month = year / 12, 24h day. Each field floors;
// the remainder carries to the next field.

use crate::config::consts::{BITCOIN_GROWTH_RATE, GOLD_GROWTH_RATE, SECONDS_PER_YEAR};
use crate::market::usable;

const SECONDS_PER_MONTH: f64 = SECONDS_PER_YEAR / 12.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CrossoverDuration {
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CrossoverDuration {
    /// Already crossed (or nothing to compute).
    pub const ZERO: Self = Self { years: 0, months: 0, days: 0, hours: 0, minutes: 0, seconds: 0 };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Break a non-negative number of seconds down into calendar fields.
    pub fn from_seconds(total: f64) -> Self {
        if !total.is_finite() || total <= 0.0 {
            return Self::ZERO;
        }
        let years = (total / SECONDS_PER_YEAR).floor();
        let mut rem = total % SECONDS_PER_YEAR;
        let months = (rem / SECONDS_PER_MONTH).floor();
        rem %= SECONDS_PER_MONTH;
        let days = (rem / SECONDS_PER_DAY).floor();
        rem %= SECONDS_PER_DAY;
        let hours = (rem / SECONDS_PER_HOUR).floor();
        rem %= SECONDS_PER_HOUR;
        let minutes = (rem / SECONDS_PER_MINUTE).floor();
        let seconds = (rem % SECONDS_PER_MINUTE).floor();

        Self {
            years: years as u64,
            months: months as u64,
            days: days as u64,
            hours: hours as u64,
            minutes: minutes as u64,
            seconds: seconds as u64,
        }
    }

    /// Seconds represented by the fields (floored, so ≤ the value it came from).
    pub fn as_seconds(&self) -> f64 {
        self.years as f64 * SECONDS_PER_YEAR
            + self.months as f64 * SECONDS_PER_MONTH
            + self.days as f64 * SECONDS_PER_DAY
            + self.hours as f64 * SECONDS_PER_HOUR
            + self.minutes as f64 * SECONDS_PER_MINUTE
            + self.seconds as f64
    }
}

/// Annual growth assumptions. Not calibrated to anything; just the two constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthModel {
    /// Faster grower (bitcoin).
    pub fast_rate: f64,
    /// Slower grower (gold).
    pub slow_rate: f64,
}

impl Default for GrowthModel {
    fn default() -> Self {
        Self { fast_rate: BITCOIN_GROWTH_RATE, slow_rate: GOLD_GROWTH_RATE }
    }
}

/// What a projection says, before formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Bitcoin already at/above gold, or an input was missing.
    Overtaken,
    /// No finite positive crossing under this model.
    Uncomputable,
    In(CrossoverDuration),
}

impl GrowthModel {
    pub fn relative_rate(&self) -> f64 {
        self.fast_rate - self.slow_rate
    }

    /// Fractional years until crossing. `None` when the inputs say "already crossed"
    /// (missing/zero/NaN input, or bitcoin ≥ gold).
    pub fn years_to_cross(&self, gold_cap: f64, bitcoin_cap: f64) -> Option<f64> {
        if bitcoin_cap >= gold_cap {
            return None;
        }
        let ratio = gold_cap / bitcoin_cap;
        Some(ratio.ln() / (1.0 + self.relative_rate()).ln())
    }

    /// `Some(ZERO)` for "already crossed / not computable from inputs",
    /// `None` for "no positive crossing exists", else the breakdown.
    pub fn project(&self, gold_cap: Option<f64>, bitcoin_cap: Option<f64>) -> Option<CrossoverDuration> {
        let (Some(gold), Some(bitcoin)) = (usable(gold_cap), usable(bitcoin_cap)) else {
            return Some(CrossoverDuration::ZERO);
        };
        let Some(years) = self.years_to_cross(gold, bitcoin) else {
            return Some(CrossoverDuration::ZERO);
        };
        if !years.is_finite() || years <= 0.0 {
            return None;
        }
        Some(CrossoverDuration::from_seconds(years * SECONDS_PER_YEAR))
    }

    pub fn outcome(&self, gold_cap: Option<f64>, bitcoin_cap: Option<f64>) -> Outcome {
        match self.project(gold_cap, bitcoin_cap) {
            None => Outcome::Uncomputable,
            Some(d) if d.is_zero() => Outcome::Overtaken,
            Some(d) => Outcome::In(d),
        }
    }

    /// Total seconds until crossing, before the calendar breakdown.
    pub fn seconds_to_cross(&self, gold_cap: f64, bitcoin_cap: f64) -> Option<f64> {
        let (gold, bitcoin) = (usable(Some(gold_cap))?, usable(Some(bitcoin_cap))?);
        self.years_to_cross(gold, bitcoin)
            .filter(|y| y.is_finite() && *y > 0.0)
            .map(|y| y * SECONDS_PER_YEAR)
    }
}

/// Projection under the default model.
pub fn project(gold_cap: Option<f64>, bitcoin_cap: Option<f64>) -> Option<CrossoverDuration> {
    GrowthModel::default().project(gold_cap, bitcoin_cap)
}
