//! In-memory TTL cache.

use super::service::CacheService;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::CacheEntry;
use chrono::Duration;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Process-local cache with a fixed TTL and lazy expiry.
///
/// Reads never touch the network. An expired entry found by
/// [`CacheService::get`] is removed on the spot; the rest are reclaimed by
/// [`CacheService::purge_expired`].
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl MemoryCache {
    /// Creates a cache backed by the system clock.
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_clock(ttl_seconds, Arc::new(SystemClock))
    }

    /// Creates a cache with an injected clock.
    pub fn with_clock(ttl_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);

        Self {
            entries: DashMap::new(),
            clock,
            ttl,
        }
    }

    /// Returns a copy of the stored entry, live or expired.
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.clone())
    }
}

impl CacheService for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();

        // The shard guard must be released before `remove_if` locks it again.
        let live = self
            .entries
            .get(key)
            .map(|entry| entry.is_live(now).then(|| entry.value.clone()))?;
        if live.is_some() {
            return live;
        }

        // Another writer may have refreshed the key since the read.
        if self
            .entries
            .remove_if(key, |_, entry| !entry.is_live(now))
            .is_some()
        {
            debug!(key, "Dropped expired cache entry");
        }
        None
    }

    fn set(&self, key: &str, value: Value) {
        let entry = CacheEntry::new(key, value, self.clock.now(), self.ttl);
        debug!(key, expires_at = %entry.expires_at, "Cache SET");
        self.entries.insert(key.to_string(), entry);
    }

    fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
