mod common;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_health_endpoint_success() {
    let ctx = common::create_test_context().await;
    let server = common::create_test_server(ctx.state.clone());

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["message"], "memory, 0 entries");
}

#[tokio::test]
async fn test_health_reports_cached_entries() {
    let ctx = common::create_test_context().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/2000", common::POSTAL_CODE_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"postal_code": "2000"})))
        .mount(&ctx.upstream)
        .await;

    let server = common::create_test_server(ctx.state.clone());
    server.get("/postal_codes/2000").await.assert_status_ok();

    let json = server.get("/health").await.json::<serde_json::Value>();
    assert_eq!(json["checks"]["cache"]["message"], "memory, 1 entries");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = common::create_test_context_with(common::TestOptions {
        cache_enabled: false,
        ..Default::default()
    })
    .await;
    let server = common::create_test_server(ctx.state.clone());

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("cache").is_some());
    assert_eq!(json["checks"]["cache"]["message"], "disabled, 0 entries");
}
