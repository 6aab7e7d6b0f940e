//! Cached upstream document with an absolute expiry time.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// A cached upstream response.
///
/// An entry is live while `now < expires_at`. Expired entries are treated as
/// absent by every reader; they linger in memory only until the next sweep or
/// until a lookup for the same key removes them.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub value: Value,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Creates an entry that expires `ttl` after `now`.
    ///
    /// A TTL that overflows the calendar never expires.
    pub fn new(key: impl Into<String>, value: Value, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            value,
            expires_at: now
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Returns true if the entry may still be served at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
