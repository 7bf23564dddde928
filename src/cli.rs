// src/cli.rs
use std::{sync::Arc, time::Duration};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

use crate::{
    config::options::{AppOptions, FallbackPolicy, SourceKind, SourceOptions},
    format::{Dashboard, Freshness},
    log::{self, LogOptions},
    market::MemoryCache,
    poll::{PollDriver, Sink, StopReason},
    scrape::Collector,
    server::{self, ServerState},
    source::Upstream,
};

#[derive(Debug, Parser)]
#[command(name = "goldcross-cli", version, about = "Gold vs bitcoin market cap countdown")]
pub struct Cli {
    #[command(flatten)]
    pub common: Common,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll and print one line per cycle (default)
    Watch,
    /// Run a single cycle and exit
    Once,
    /// Serve GET /scrape
    Serve {
        #[arg(long, env = "GOLDCROSS_BIND", default_value = crate::config::consts::BIND_ADDR)]
        bind: String,
    },
}

#[derive(Debug, Args)]
pub struct Common {
    /// direct | proxy | headless | api
    #[arg(long, env = "GOLDCROSS_SOURCE", default_value = "direct")]
    pub source: SourceKind,

    /// Market page URL (or the /scrape endpoint for --source api)
    #[arg(long, env = "GOLDCROSS_URL")]
    pub url: Option<String>,

    /// Proxy template; `{url}` is replaced by the encoded target
    #[arg(long, env = "GOLDCROSS_PROXY")]
    pub proxy: Option<String>,

    /// Browser binary for --source headless
    #[arg(long, env = "GOLDCROSS_BROWSER")]
    pub browser: Option<String>,

    /// Seconds between cycles
    #[arg(long, env = "GOLDCROSS_INTERVAL", default_value_t = 60)]
    pub interval: u64,

    /// Upper bound on one fetch, in seconds
    #[arg(long, env = "GOLDCROSS_FETCH_TIMEOUT", default_value_t = 35)]
    pub fetch_timeout: u64,

    /// Stop after this many cycles
    #[arg(long)]
    pub max_cycles: Option<u64>,

    /// cache or null: what a failed cycle shows
    #[arg(long, env = "GOLDCROSS_FALLBACK")]
    pub fallback: Option<FallbackPolicy>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, env = "GOLDCROSS_LOG", default_value = "info")]
    pub log: String,

    /// Also log to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

impl Common {
    pub fn to_options(&self) -> AppOptions {
        let mut o = AppOptions::default();
        o.source.kind = self.source;
        o.source.url = self
            .url
            .clone()
            .unwrap_or_else(|| s!(SourceOptions::default_url_for(self.source)));
        if let Some(p) = &self.proxy {
            o.source.proxy_template = p.clone();
        }
        if let Some(b) = &self.browser {
            o.source.browser = b.clone();
        }
        o.poll.interval = Duration::from_secs(self.interval.max(1));
        o.poll.fetch_timeout = Duration::from_secs(self.fetch_timeout.max(1));
        o.poll.max_cycles = self.max_cycles;
        if let Some(p) = self.fallback {
            o.fallback = p;
            o.serve.fallback = p;
        }
        o
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let _log = log::init(&LogOptions {
        level: cli.common.log.clone(),
        stderr: cli.common.verbose,
        ..LogOptions::default()
    });

    let opts = cli.common.to_options();
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("starting tokio runtime")?;

    rt.block_on(async move {
        match cli.command.unwrap_or(Command::Watch) {
            Command::Watch => watch(&opts).await,
            Command::Once => once(&opts).await,
            Command::Serve { bind } => serve(&opts, &bind).await,
        }
    })
}

fn collector(opts: &AppOptions, policy: FallbackPolicy) -> Result<Arc<Collector>> {
    let upstream = Upstream::from_options(&opts.source).wrap_err("setting up source")?;
    Ok(Arc::new(Collector::new(upstream, Arc::new(MemoryCache::new()), policy)))
}

async fn watch(opts: &AppOptions) -> Result<()> {
    let driver = PollDriver::new(collector(opts, opts.fallback)?, opts.poll.clone());

    let cancel = driver.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    driver.run(&mut ConsoleSink::default()).await;
    Ok(())
}

async fn once(opts: &AppOptions) -> Result<()> {
    let driver = PollDriver::new(collector(opts, opts.fallback)?, opts.poll.clone());
    let board = driver.cycle().await;
    println!("{}", console_line(&board));
    Ok(())
}

async fn serve(opts: &AppOptions, bind: &str) -> Result<()> {
    let state = ServerState {
        collector: collector(opts, opts.serve.fallback)?,
        fetch_timeout: opts.poll.fetch_timeout,
    };
    println!("Server running at http://{bind}");
    server::serve(bind, state, async {
        let _ = tokio::signal::ctrl_c().await;
        logf!("Serve: shutdown signal received");
    })
    .await
    .wrap_err_with(|| format!("serving on {bind}"))
}

/// Prints one line per cycle.
#[derive(Default)]
pub struct ConsoleSink {
    pub cycles: u64,
}

impl Sink for ConsoleSink {
    fn cycle_started(&mut self, n: u64) {
        self.cycles = n;
    }

    fn show(&mut self, board: &Dashboard) {
        println!("[{}] {}", self.cycles, console_line(board));
    }

    fn finish(&mut self, reason: StopReason) {
        match reason {
            StopReason::Overtaken => println!("Bitcoin has overtaken Gold! Polling stopped."),
            StopReason::Cancelled => println!("Polling cancelled."),
            StopReason::MaxCycles => println!("Done after {} cycle(s).", self.cycles),
        }
    }
}

pub fn console_line(board: &Dashboard) -> String {
    let mut line = format!(
        "Gold {} | Bitcoin {} | Countdown {}",
        board.gold, board.bitcoin, board.countdown
    );
    if board.freshness != Freshness::Fresh {
        if let Some(note) = &board.note {
            line.push_str(&format!(" ({note})"));
        }
    }
    line
}
