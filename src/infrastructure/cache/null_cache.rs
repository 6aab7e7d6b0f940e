//! No-op cache implementation for disabled caching.

use super::service::CacheService;
use serde_json::Value;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when caching is disabled with `CACHE_ENABLED=false`: every lookup
/// misses, so each request goes to the upstream API.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheService for NullCache {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    fn set(&self, _key: &str, _value: Value) {}

    fn purge_expired(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}
