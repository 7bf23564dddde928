// src/market/cache.rs
use std::sync::Mutex;

use super::MarketSnapshot;

/// Last-known-good store. Only complete snapshots go in; nothing ever clears it.
pub trait SnapshotCache: Send + Sync {
    /// Most recent complete snapshot, if any cycle has produced one.
    fn last_valid(&self) -> Option<MarketSnapshot>;

    /// Store `snap` if both values are usable. Returns whether it was stored.
    fn put_if_complete(&self, snap: &MarketSnapshot) -> bool;
}

/// Process-local cache. Writers are serialized by the poll driver anyway;
/// the mutex only makes sharing with the server handler sound.
#[derive(Debug, Default)]
pub struct MemoryCache {
    last: Mutex<Option<MarketSnapshot>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known snapshot (tests, warm restarts).
    pub fn seeded(snap: MarketSnapshot) -> Self {
        let cache = Self::new();
        cache.put_if_complete(&snap);
        cache
    }
}

impl SnapshotCache for MemoryCache {
    fn last_valid(&self) -> Option<MarketSnapshot> {
        *self.last.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn put_if_complete(&self, snap: &MarketSnapshot) -> bool {
        if !snap.is_complete() {
            return false;
        }
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(snap.guarded());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_snapshots_never_overwrite() {
        let cache = MemoryCache::new();
        assert_eq!(cache.last_valid(), None);

        let good = MarketSnapshot::new(Some(20.0), Some(2.0));
        assert!(cache.put_if_complete(&good));
        assert!(!cache.put_if_complete(&MarketSnapshot::new(Some(21.0), None)));
        assert!(!cache.put_if_complete(&MarketSnapshot::new(Some(f64::NAN), Some(3.0))));
        assert_eq!(cache.last_valid(), Some(good));
    }
}
