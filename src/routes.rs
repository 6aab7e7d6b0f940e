//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`            - Health check (not rate limited)
//! - `GET  /postal_codes/{id}` - Cached postal code lookup
//! - `GET  /hs-code`           - Item-category listing
//! - `POST /webhook`           - Tracking status webhook
//! - `POST /webhook-label`     - Label event webhook
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, matching the public lookup use case
//! - **Compression** - gzip responses when the client accepts it
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `config` - supplies the inbound rate limit; when `behind_proxy` is set,
///   clients are keyed by forwarding headers instead of the peer address
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let api_router = if config.behind_proxy {
        api::routes::routes().layer(rate_limit::proxy_layer(
            config.rate_limit_per_second,
            config.rate_limit_burst,
        ))
    } else {
        api::routes::routes().layer(rate_limit::layer(
            config.rate_limit_per_second,
            config.rate_limit_burst,
        ))
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api_router)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
