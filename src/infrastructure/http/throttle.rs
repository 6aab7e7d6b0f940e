//! Token-bucket throttle for upstream API calls.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde_json::json;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::AppError;

/// Limits outbound calls to `per_second` requests per second.
///
/// A caller over budget waits for a token at most `max_wait`; past that it
/// gets [`AppError::RateLimited`]. A zero `max_wait` rejects immediately.
pub struct OutboundThrottle {
    limiter: DefaultDirectRateLimiter,
    per_second: NonZeroU32,
    max_wait: Duration,
}

impl OutboundThrottle {
    pub fn new(per_second: NonZeroU32, max_wait: Duration) -> Self {
        Self {
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
            per_second,
            max_wait,
        }
    }

    /// Takes one token, waiting up to `max_wait` for it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RateLimited`] if no token became available in time.
    pub async fn acquire(&self) -> Result<(), AppError> {
        if self.limiter.check().is_ok() {
            return Ok(());
        }

        if !self.max_wait.is_zero()
            && tokio::time::timeout(self.max_wait, self.limiter.until_ready())
                .await
                .is_ok()
        {
            return Ok(());
        }

        metrics::counter!("postal_relay_upstream_throttled_total").increment(1);
        tracing::warn!(
            per_second = self.per_second.get(),
            max_wait_ms = self.max_wait.as_millis() as u64,
            "Outbound rate limit exhausted"
        );

        Err(AppError::rate_limited(
            "Upstream request budget exhausted",
            json!({
                "limit_per_second": self.per_second.get(),
                "max_wait_ms": self.max_wait.as_millis() as u64,
            }),
        ))
    }
}
