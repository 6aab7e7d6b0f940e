//! HTTP server initialization and runtime setup.
//!
//! Wires the outbound clients, cache, background sweeper, and Axum server lifecycle.

use crate::application::services::{LookupService, RelayService};
use crate::config::Config;
use crate::domain::entities::Sink;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, run_cache_sweeper};
use crate::infrastructure::http::{EasyshipClient, HttpSink, OutboundThrottle, build_http_client};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Shared outbound HTTP client
/// - In-memory cache (or NullCache when disabled) and its sweeper
/// - Optional upstream throttle
/// - Lookup and relay services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let client = build_http_client(Duration::from_secs(config.http_timeout_seconds))?;

    let cache: Arc<dyn CacheService> = if config.cache_enabled {
        tracing::info!("Cache enabled (memory, TTL {}s)", config.cache_ttl_seconds);
        Arc::new(MemoryCache::new(config.cache_ttl_seconds))
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let mut easyship = EasyshipClient::new(
        client.clone(),
        &config.postal_code_base_url,
        &config.item_categories_url,
        &config.easyship_api_key,
    );
    if let Some(per_second) = config.upstream_rate_limit_per_second.and_then(NonZeroU32::new) {
        easyship = easyship.with_throttle(Arc::new(OutboundThrottle::new(
            per_second,
            Duration::from_millis(config.upstream_rate_limit_max_wait_ms),
        )));
        tracing::info!("Upstream throttle enabled ({}/s)", per_second);
    }

    let lookup_service = LookupService::new(Arc::new(easyship), cache.clone())
        .with_item_category_caching(config.cache_item_categories);

    let relay_service = RelayService::new(
        Arc::new(HttpSink::new(
            client.clone(),
            &config.forwarding_url,
            Sink::Downstream,
        )),
        Arc::new(HttpSink::new(
            client,
            &config.discord_webhook_url,
            Sink::Notifier,
        )),
    );

    let state = AppState::new(Arc::new(lookup_service), Arc::new(relay_service));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = tokio::spawn(run_cache_sweeper(
        cache,
        Duration::from_secs(config.cache_sweep_interval_seconds),
        shutdown_rx,
    ));
    tracing::info!("Cache sweeper started");

    let app = app_router(state, &config);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper.await {
        tracing::warn!("Cache sweeper ended abnormally: {}", e);
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
