// tests/collector.rs
//
// Collect cycles against a scripted source: cache vs null fallback,
// partial pages, timeouts and the non-overlap gate.
//
mod common;

use std::{sync::Arc, time::Duration};

use common::{Step, collector, down, page, Scripted};
use goldcross::config::options::FallbackPolicy;
use goldcross::format::{Dashboard, Freshness};
use goldcross::market::{MarketSnapshot, MemoryCache, SnapshotCache};
use goldcross::projection::GrowthModel;
use goldcross::scrape::Collected;

fn full() -> String {
    page(Some("$20 T"), Some("$2 T"))
}

const FULL: MarketSnapshot = MarketSnapshot { gold_cap: Some(20.0e12), bitcoin_cap: Some(2.0e12) };

#[tokio::test]
async fn complete_page_is_fresh_and_cached() {
    let src = Scripted::new(vec![Step::Page(full())]);
    let cache = Arc::new(MemoryCache::new());
    let c = collector(&src, Arc::clone(&cache), FallbackPolicy::Cache);

    assert_eq!(c.collect().await, Collected::Fresh(FULL));
    assert_eq!(cache.last_valid(), Some(FULL));
}

#[tokio::test]
async fn transport_failure_serves_cached_pair() {
    let src = Scripted::new(vec![Step::Page(full()), Step::Fail(down())]);
    let c = collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache);

    assert!(c.collect().await.is_fresh());
    let second = c.collect().await;
    match &second {
        Collected::Stale { cached, reason } => {
            assert_eq!(*cached, FULL);
            assert!(reason.contains("connection refused"), "{reason}");
        }
        other => panic!("expected stale, got {other:?}"),
    }

    // countdown comes from the cached pair, values are marked
    let board = Dashboard::build(&second, &GrowthModel::default());
    assert_eq!(board.freshness, Freshness::Cached);
    assert!(board.gold.ends_with("(cached)"));
    assert!(board.countdown.starts_with("6y "));
}

#[tokio::test]
async fn null_policy_ignores_cache() {
    let cache = Arc::new(MemoryCache::seeded(FULL));
    let src = Scripted::new(vec![Step::Fail(down())]);
    let c = collector(&src, cache, FallbackPolicy::Null);

    let out = c.collect().await;
    assert!(matches!(out, Collected::Failed { .. }));
    assert_eq!(out.snapshot(), MarketSnapshot::EMPTY);
}

#[tokio::test]
async fn failure_without_cache_is_failed() {
    let src = Scripted::new(vec![Step::Fail(down())]);
    let c = collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache);

    let board = Dashboard::build(&c.collect().await, &GrowthModel::default());
    assert_eq!(board.gold, "Error fetching data");
    assert_eq!(board.countdown, "Error");
}

#[tokio::test]
async fn missing_bitcoin_row_without_cache_shows_errors() {
    let src = Scripted::new(vec![Step::Page(page(Some("$20 T"), None))]);
    let cache = Arc::new(MemoryCache::new());
    let c = collector(&src, Arc::clone(&cache), FallbackPolicy::Cache);

    let out = c.collect().await;
    assert_eq!(
        out,
        Collected::Partial {
            snapshot: MarketSnapshot::new(Some(20.0e12), None),
            reason: "bitcoin not found".into(),
        }
    );
    assert_eq!(cache.last_valid(), None);

    let board = Dashboard::build(&out, &GrowthModel::default());
    assert_eq!(board.gold, "$20,000,000,000,000");
    assert_eq!(board.bitcoin, "Error");
    assert_eq!(board.countdown, "Error");
}

#[tokio::test]
async fn partial_page_falls_back_to_whole_cached_pair() {
    let src = Scripted::new(vec![Step::Page(full()), Step::Page(page(Some("$30 T"), None))]);
    let c = collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache);

    c.collect().await;
    // never mixes the fresh $30 T gold with the cached bitcoin
    assert_eq!(c.collect().await.snapshot(), FULL);
}

#[tokio::test]
async fn page_without_table_is_a_failure() {
    let src = Scripted::new(vec![Step::Page(s("<html>captcha</html>"))]);
    let c = collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Null);

    let out = c.collect().await;
    assert!(matches!(&out, Collected::Failed { reason } if reason.starts_with("structure")));
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out_into_fallback() {
    let src = Scripted::new(vec![
        Step::Page(full()),
        Step::Slow(Duration::from_secs(60), page(Some("$1 T"), Some("$9 T"))),
    ]);
    let c = collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache);

    assert!(c.collect_within(Duration::from_secs(35)).await.is_fresh());
    let out = c.collect_within(Duration::from_secs(35)).await;
    assert!(matches!(&out, Collected::Stale { cached, reason } if *cached == FULL && reason.contains("timed out")));
}

#[tokio::test(start_paused = true)]
async fn concurrent_collects_do_not_overlap() {
    let slow = || Step::Slow(Duration::from_secs(5), full());
    let src = Scripted::new(vec![slow(), slow()]);
    let c = collector(&src, Arc::new(MemoryCache::new()), FallbackPolicy::Cache);

    let started = tokio::time::Instant::now();
    let (a, b) = tokio::join!(c.collect(), c.collect());
    assert!(a.is_fresh() && b.is_fresh());
    assert_eq!(src.calls(), 2);
    // serialized: 5s + 5s
    assert!(started.elapsed() >= Duration::from_secs(10));
}

fn s(v: &str) -> String {
    v.to_string()
}
