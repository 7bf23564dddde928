// src/lib.rs

#[macro_use]
pub mod macros;

#[doc(hidden)]
pub use tracing as __tracing;

pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod gui;
pub mod log;
pub mod market;
pub mod poll;
pub mod projection;
pub mod scrape;
pub mod source;
pub mod specs;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;
