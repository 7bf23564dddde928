// tests/poll_driver.rs
//
// Poll loop timing and stop conditions, on paused tokio time.
//
mod common;

use std::{sync::Arc, time::Duration};

use common::{Step, Scripted, collector, down, page};
use goldcross::config::options::{FallbackPolicy, PollOptions};
use goldcross::format::{Dashboard, Freshness};
use goldcross::market::MemoryCache;
use goldcross::poll::{PollDriver, Sink, StopReason};
use tokio::time::Instant;

/// Records everything the driver tells it, with the (paused) time of each cycle.
#[derive(Default)]
struct Recorder {
    started: Vec<(u64, Instant)>,
    boards: Vec<Dashboard>,
    finished: Vec<StopReason>,
}

impl Sink for Recorder {
    fn cycle_started(&mut self, n: u64) {
        self.started.push((n, Instant::now()));
    }
    fn show(&mut self, board: &Dashboard) {
        self.boards.push(board.clone());
    }
    fn finish(&mut self, reason: StopReason) {
        self.finished.push(reason);
    }
}

fn opts(max_cycles: Option<u64>) -> PollOptions {
    PollOptions {
        interval: Duration::from_secs(60),
        fetch_timeout: Duration::from_secs(35),
        max_cycles,
    }
}

fn behind() -> String {
    page(Some("$20 T"), Some("$2 T"))
}

#[tokio::test(start_paused = true)]
async fn first_cycle_is_immediate_then_every_interval() {
    let src = Scripted::new(vec![Step::Page(behind())]);
    let driver = PollDriver::new(
        collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache),
        opts(Some(3)),
    );

    let t0 = Instant::now();
    let mut rec = Recorder::default();
    driver.run(&mut rec).await;

    let offsets: Vec<u64> = rec.started.iter().map(|(_, at)| (*at - t0).as_secs()).collect();
    assert_eq!(offsets, vec![0, 60, 120]);
    assert_eq!(rec.finished, vec![StopReason::MaxCycles]);
    assert_eq!(src.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn stops_for_good_once_bitcoin_overtakes() {
    let src = Scripted::new(vec![
        Step::Page(behind()),
        Step::Page(page(Some("$20 T"), Some("$21 T"))),
    ]);
    let driver = PollDriver::new(
        collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache),
        opts(None),
    );

    let mut rec = Recorder::default();
    let last = driver.run(&mut rec).await;

    assert_eq!(rec.boards.len(), 2);
    assert_eq!(rec.finished, vec![StopReason::Overtaken]);
    assert_eq!(last.countdown, "Bitcoin has overtaken Gold!");
    assert_eq!(src.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn failures_keep_polling() {
    let src = Scripted::new(vec![
        Step::Fail(down()),
        Step::Fail(down()),
        Step::Page(behind()),
    ]);
    let driver = PollDriver::new(
        collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache),
        opts(Some(3)),
    );

    let mut rec = Recorder::default();
    driver.run(&mut rec).await;

    let states: Vec<Freshness> = rec.boards.iter().map(|b| b.freshness).collect();
    assert_eq!(states, vec![Freshness::Failed, Freshness::Failed, Freshness::Fresh]);
}

#[tokio::test(start_paused = true)]
async fn slow_fetch_delays_next_cycle_without_overlap() {
    let src = Scripted::new(vec![
        Step::Slow(Duration::from_secs(30), behind()),
        Step::Page(behind()),
    ]);
    let driver = PollDriver::new(
        collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache),
        PollOptions { interval: Duration::from_secs(10), ..opts(Some(2)) },
    );

    let t0 = Instant::now();
    let mut rec = Recorder::default();
    driver.run(&mut rec).await;

    let second = (rec.started[1].1 - t0).as_secs();
    assert!(second >= 30, "second cycle started at {second}s while first was in flight");
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_between_cycles() {
    let src = Scripted::new(vec![Step::Page(behind())]);
    let driver = PollDriver::new(
        collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache),
        opts(None),
    );

    let cancel = driver.cancel_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(90)).await;
        cancel.cancel();
    });

    let mut rec = Recorder::default();
    driver.run(&mut rec).await;

    assert_eq!(rec.started.len(), 2);
    assert_eq!(rec.finished, vec![StopReason::Cancelled]);
}
