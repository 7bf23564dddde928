// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific knowledge of **where the numbers live in the HTML**.
//!
//! ## What lives here
//! - **Pure HTML parsing** of the market page (`assets-by-market-cap`), no I/O.
//! - **Selector choice & precedence**: which column holds the name, which holds the
//!   cap, and which row wins when several names match.
//! - **Tolerant extraction** using `core::html` (case-insensitive tag scanning, implied
//!   closing tags, entity/whitespace normalization).
//!
//! ## What does **not** live here
//! - **Fetching** (direct / proxy / headless): see `source`.
//! - **Numbers**: specs return the raw cell text; `market::cap` turns it into USD.
//! - **Caching & fallback**: `scrape::Collector` decides what a failed cycle shows.
//!
//! ## Typical call chain
//! ```text
//! poll / server → scrape::Collector::collect → source::HtmlSource::fetch_market_html
//!                                           ↘ specs::assets::extract → market::cap::parse_cap
//! ```
//!
//! ## Conventions & invariants
//! - Never fail: missing rows, cells or tables just leave outputs `None`.
//! - Document order decides ties (first matching row wins).
//! - Testable offline against captured fixtures (`tests/fixtures/`).
pub mod assets;
