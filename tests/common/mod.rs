#![allow(dead_code)]

use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use postal_relay::api::handlers::health_handler;
use postal_relay::application::services::{LookupService, RelayService};
use postal_relay::domain::entities::Sink;
use postal_relay::infrastructure::cache::{CacheService, MemoryCache, NullCache};
use postal_relay::infrastructure::http::{EasyshipClient, HttpSink, build_http_client};
use postal_relay::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const POSTAL_CODE_PATH: &str = "/api/v1/countries/14/postal_codes";
pub const ITEM_CATEGORIES_PATH: &str = "/2024-09/item_categories";
pub const FORWARDING_PATH: &str = "/webhooks/result";
pub const DISCORD_PATH: &str = "/api/webhooks/1/token";

/// Upstream, downstream and chat servers backing one test app.
pub struct TestContext {
    pub upstream: MockServer,
    pub downstream: MockServer,
    pub discord: MockServer,
    pub state: AppState,
}

pub struct TestOptions {
    pub cache_enabled: bool,
    pub cache_item_categories: bool,
    pub timeout: Duration,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_item_categories: false,
            timeout: Duration::from_secs(2),
        }
    }
}

pub async fn create_test_context() -> TestContext {
    create_test_context_with(TestOptions::default()).await
}

pub async fn create_test_context_with(options: TestOptions) -> TestContext {
    let upstream = MockServer::start().await;
    let downstream = MockServer::start().await;
    let discord = MockServer::start().await;

    let client = build_http_client(options.timeout).unwrap();

    let cache: Arc<dyn CacheService> = if options.cache_enabled {
        Arc::new(MemoryCache::new(600))
    } else {
        Arc::new(NullCache::new())
    };

    let easyship = EasyshipClient::new(
        client.clone(),
        format!("{}{}/", upstream.uri(), POSTAL_CODE_PATH),
        format!("{}{}", upstream.uri(), ITEM_CATEGORIES_PATH),
        API_KEY,
    );

    let lookup_service = LookupService::new(Arc::new(easyship), cache)
        .with_item_category_caching(options.cache_item_categories);

    let relay_service = RelayService::new(
        Arc::new(HttpSink::new(
            client.clone(),
            format!("{}{}", downstream.uri(), FORWARDING_PATH),
            Sink::Downstream,
        )),
        Arc::new(HttpSink::new(
            client,
            format!("{}{}", discord.uri(), DISCORD_PATH),
            Sink::Notifier,
        )),
    );

    let state = AppState::new(Arc::new(lookup_service), Arc::new(relay_service));

    TestContext {
        upstream,
        downstream,
        discord,
        state,
    }
}

/// API routes plus `/health`, without rate limiting.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(postal_relay::api::routes::routes())
        .with_state(state);

    TestServer::new(app).unwrap()
}
