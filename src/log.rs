// src/log.rs
// File logging under the store dir, optionally mirrored to stderr.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::consts::{LOG_FILE, STORE_DIR};

#[derive(Clone, Debug)]
pub struct LogOptions {
    /// Fallback filter when `RUST_LOG` is unset, e.g. `info` or `goldcross=debug`.
    pub level: String,
    pub stderr: bool,
    pub dir: PathBuf,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: s!("info"),
            stderr: false,
            dir: PathBuf::from(STORE_DIR),
        }
    }
}

/// Install the global subscriber.
/// Keep the returned guard alive for the life of the process; dropping it flushes the file.
/// Returns `None` if a subscriber was already installed or the log dir can't be created.
pub fn init(opts: &LogOptions) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(&opts.dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::never(&opts.dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&opts.level))
    };

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter());

    let stderr_layer = opts.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .ok()?;

    Some(guard)
}
