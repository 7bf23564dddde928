// src/error.rs
use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong between "start fetch" and "two numbers".
/// None of these escape the collector; they become null fields or a cached fallback.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("transport: {0}")]
    Transport(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("timed out after {0:?} waiting for {1}")]
    Timeout(Duration, &'static str),

    #[error("browser: {0}")]
    Browser(String),

    #[error("structure: {0}")]
    Structure(String),

    #[error("parse: {0}")]
    Parse(String),
}

/// Coarse failure classes; all handled the same way at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureClass {
    Transport,
    Structure,
    Parse,
}

impl ScrapeError {
    pub fn class(&self) -> FailureClass {
        match self {
            ScrapeError::Transport(_)
            | ScrapeError::Status { .. }
            | ScrapeError::Timeout(..)
            | ScrapeError::Browser(_) => FailureClass::Transport,
            ScrapeError::Structure(_) => FailureClass::Structure,
            ScrapeError::Parse(_) => FailureClass::Parse,
        }
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            let url = e.url().map(|u| u.to_string()).unwrap_or_default();
            return ScrapeError::Status { status: status.as_u16(), url };
        }
        if e.is_decode() {
            return ScrapeError::Parse(e.to_string());
        }
        ScrapeError::Transport(e.to_string())
    }
}

impl From<std::io::Error> for ScrapeError {
    fn from(e: std::io::Error) -> Self {
        ScrapeError::Browser(e.to_string())
    }
}
