//! Inbound rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Rate limiter keyed by the socket peer address.
pub type PeerRateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`.
pub type ProxyRateLimitLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Interval between token refills for `per_second` requests per second.
fn replenish_period(per_second: u64) -> Duration {
    Duration::from_nanos(1_000_000_000 / per_second.max(1))
}

/// Creates a per-client rate limiter keyed by peer IP.
///
/// Each client IP refills one token every `1 / per_second` seconds and may
/// hold up to `burst` tokens. Requests over the limit receive
/// `429 Too Many Requests`.
///
/// Requires the server to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Panics
///
/// Panics if `per_second` or `burst` is zero; [`crate::config::Config::validate`]
/// rejects both at startup.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/webhook", post(tracking_webhook_handler))
///     .layer(rate_limit::layer(10, 50));
/// ```
pub fn layer(per_second: u64, burst: u32) -> PeerRateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(replenish_period(per_second))
            .burst_size(burst)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a per-client rate limiter for deployments behind a reverse proxy.
///
/// Reads the client IP from forwarding headers, falling back to the peer
/// address. Enable only behind a trusted proxy; clients can spoof these headers.
///
/// # Panics
///
/// Same as [`layer`].
pub fn proxy_layer(per_second: u64, burst: u32) -> ProxyRateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(replenish_period(per_second))
            .burst_size(burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
