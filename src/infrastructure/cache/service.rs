//! Cache service trait.

use serde_json::Value;

/// Key-value cache for upstream JSON documents.
///
/// Implementations must be thread-safe. Every entry carries the same TTL,
/// fixed when the cache is built. Expired entries are never returned.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-memory cache with lazy expiry
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
pub trait CacheService: Send + Sync {
    /// Returns the cached document for `key` if it is still live.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: Value);

    /// Drops every expired entry and returns how many were removed.
    fn purge_expired(&self) -> usize;

    /// Number of stored entries, including expired ones not yet purged.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
