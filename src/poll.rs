// src/poll.rs
// Periodic collect → project → format → sink.
//
// - first cycle runs immediately, then every `interval`
// - cycles never overlap: the next tick is only awaited after the previous cycle resolves
// - each collect is bounded by `fetch_timeout`
// - stops for good once a fresh cycle shows bitcoin ≥ gold

use std::{sync::Arc, time::Instant};

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    config::options::PollOptions,
    format::Dashboard,
    projection::GrowthModel,
    scrape::Collector,
};

/// Display boundary. Frontends (GUI/CLI) implement this; every method has a no-op default.
pub trait Sink: Send {
    /// A cycle is about to fetch. `n` counts from 1.
    fn cycle_started(&mut self, _n: u64) {}

    /// Fresh display strings for the cycle that just finished.
    fn show(&mut self, _board: &Dashboard) {}

    /// Polling is over; called exactly once.
    fn finish(&mut self, _reason: StopReason) {}
}

/// A sink that drops everything.
pub struct NullSink;
impl Sink for NullSink {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Overtaken,
    Cancelled,
    MaxCycles,
}

pub struct PollDriver {
    collector: Arc<Collector>,
    model: GrowthModel,
    opts: PollOptions,
    cancel: CancellationToken,
}

impl PollDriver {
    pub fn new(collector: Arc<Collector>, opts: PollOptions) -> Self {
        Self { collector, model: GrowthModel::default(), opts, cancel: CancellationToken::new() }
    }

    pub fn with_model(mut self, model: GrowthModel) -> Self {
        self.model = model;
        self
    }

    /// Share an existing token (e.g. one owned by the window).
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that stops the loop (GUI close, Ctrl+C, "Stop" button).
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// One collect → project → format pass.
    pub async fn cycle(&self) -> Dashboard {
        let started = Instant::now();
        let collected = self.collector.collect_within(self.opts.fetch_timeout).await;
        let board = Dashboard::build(&collected, &self.model);
        logf!(
            "Poll: {:?} in {} ms | gold={} bitcoin={} countdown={}",
            board.freshness,
            started.elapsed().as_millis(),
            board.gold,
            board.bitcoin,
            board.countdown
        );
        board
    }

    /// Run until overtaken, cancelled or out of cycles. Returns the last dashboard.
    pub async fn run(&self, sink: &mut dyn Sink) -> Dashboard {
        let mut ticker = time::interval(self.opts.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last = Dashboard::default();
        let mut n: u64 = 0;

        let reason = loop {
            // first tick completes immediately
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break StopReason::Cancelled,
                _ = ticker.tick() => {}
            }

            n += 1;
            sink.cycle_started(n);

            let board = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break StopReason::Cancelled,
                b = self.cycle() => b,
            };
            sink.show(&board);
            let overtaken = board.is_overtaken();
            last = board;

            if overtaken {
                logf!("Poll: bitcoin has overtaken gold, stopping after {n} cycle(s)");
                break StopReason::Overtaken;
            }
            if self.opts.max_cycles.is_some_and(|max| n >= max) {
                break StopReason::MaxCycles;
            }
        };

        logd!("Poll: stopped ({reason:?})");
        sink.finish(reason);
        last
    }
}
