mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn postal_code_path(id: &str) -> String {
    format!("{}/{}", common::POSTAL_CODE_PATH, id)
}

#[tokio::test]
async fn test_lookup_returns_upstream_document() {
    let ctx = common::create_test_context().await;

    Mock::given(method("GET"))
        .and(path(postal_code_path("2000")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "postal_code": "2000",
            "city": "Sydney",
            "state": "NSW"
        })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let server = common::create_test_server(ctx.state.clone());

    let response = server.get("/postal_codes/2000").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["city"], "Sydney");
    assert_eq!(json["state"], "NSW");
}

#[tokio::test]
async fn test_second_lookup_served_from_cache() {
    let ctx = common::create_test_context().await;

    Mock::given(method("GET"))
        .and(path(postal_code_path("3000")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"city": "Melbourne"})))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let server = common::create_test_server(ctx.state.clone());

    let first = server.get("/postal_codes/3000").await.json::<Value>();
    let second = server.get("/postal_codes/3000").await.json::<Value>();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_disabled_cache_fetches_every_time() {
    let ctx = common::create_test_context_with(common::TestOptions {
        cache_enabled: false,
        ..Default::default()
    })
    .await;

    Mock::given(method("GET"))
        .and(path(postal_code_path("3000")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"city": "Melbourne"})))
        .expect(2)
        .mount(&ctx.upstream)
        .await;

    let server = common::create_test_server(ctx.state.clone());

    server.get("/postal_codes/3000").await.assert_status_ok();
    server.get("/postal_codes/3000").await.assert_status_ok();
}

#[tokio::test]
async fn test_non_numeric_id_rejected_without_upstream_call() {
    let ctx = common::create_test_context().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.upstream)
        .await;

    let server = common::create_test_server(ctx.state.clone());

    let response = server.get("/postal_codes/abc").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "invalid_key");
    assert_eq!(json["error"]["message"], "Invalid key format");
}

#[tokio::test]
async fn test_upstream_status_mirrored_and_not_cached() {
    let ctx = common::create_test_context().await;

    Mock::given(method("GET"))
        .and(path(postal_code_path("9999")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Postal code not found"})))
        .expect(2)
        .mount(&ctx.upstream)
        .await;

    let server = common::create_test_server(ctx.state.clone());

    for _ in 0..2 {
        let response = server.get("/postal_codes/9999").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let json = response.json::<Value>();
        assert_eq!(json["error"]["code"], "upstream_rejected");
        assert_eq!(json["error"]["details"]["error"], "Postal code not found");
    }
}

#[tokio::test]
async fn test_upstream_timeout_returns_gateway_timeout() {
    let ctx = common::create_test_context_with(common::TestOptions {
        timeout: Duration::from_millis(200),
        ..Default::default()
    })
    .await;

    Mock::given(method("GET"))
        .and(path(postal_code_path("2000")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"city": "Sydney"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&ctx.upstream)
        .await;

    let server = common::create_test_server(ctx.state.clone());

    let response = server.get("/postal_codes/2000").await;

    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(response.json::<Value>()["error"]["code"], "upstream_unavailable");
    assert_eq!(ctx.state.lookup_service.cache().len(), 0);
}

#[tokio::test]
async fn test_invalid_upstream_json_returns_bad_gateway() {
    let ctx = common::create_test_context().await;

    Mock::given(method("GET"))
        .and(path(postal_code_path("2000")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&ctx.upstream)
        .await;

    let server = common::create_test_server(ctx.state.clone());

    let response = server.get("/postal_codes/2000").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}
