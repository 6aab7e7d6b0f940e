mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn label_event(status: &str) -> Value {
    json!({
        "event_type": "shipment.label.created",
        "resource_type": "shipment",
        "resource_id": "ESTW100001",
        "label": {
            "easyship_shipment_id": "ESTW100001",
            "platform_order_number": "#1042",
            "status": status,
            "label_url": "https://labels.example.com/ESTW100001.pdf",
            "tracking_number": "1Z999AA10123456784",
            "tracking_page_url": "https://track.example.com/1Z999AA10123456784"
        }
    })
}

fn tracking_event(status: &str) -> Value {
    json!({
        "tracking_status": {
            "easyship_shipment_id": "ESTW100002",
            "platform_order_number": "#1043",
            "status": status,
            "tracking_number": "TRK2"
        }
    })
}

async fn accept_all(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

async fn received_json(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.body_json::<Value>().unwrap())
        .collect()
}

fn field<'a>(message: &'a Value, name: &str) -> &'a Value {
    message["embeds"][0]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == name)
        .map(|f| &f["value"])
        .unwrap_or_else(|| panic!("missing field {name}"))
}

#[tokio::test]
async fn test_label_webhook_forwards_and_notifies() {
    let ctx = common::create_test_context().await;

    Mock::given(method("POST"))
        .and(path(common::FORWARDING_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ctx.downstream)
        .await;
    Mock::given(method("POST"))
        .and(path(common::DISCORD_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ctx.discord)
        .await;

    let server = common::create_test_server(ctx.state.clone());
    let payload = label_event("success");

    let response = server.post("/webhook-label").json(&payload).await;

    response.assert_status_ok();
    response.assert_text("Payload processed successfully");

    let forwarded = received_json(&ctx.downstream).await;
    assert_eq!(forwarded, vec![payload]);

    let messages = received_json(&ctx.discord).await;
    let message = &messages[0];
    assert_eq!(message["embeds"][0]["title"], "Label Event - ESTW100001");
    assert_eq!(message["embeds"][0]["color"], 0x00ff00);
    assert_eq!(
        field(message, "Label URL"),
        "[Download Label](https://labels.example.com/ESTW100001.pdf)"
    );
    assert_eq!(field(message, "API Forwarding Status"), "Success - Status: 200");
}

#[tokio::test]
async fn test_tracking_webhook_failure_status_is_red() {
    let ctx = common::create_test_context().await;
    accept_all(&ctx.downstream, 200, 1).await;
    accept_all(&ctx.discord, 204, 1).await;

    let server = common::create_test_server(ctx.state.clone());

    server
        .post("/webhook")
        .json(&tracking_event("Exception"))
        .await
        .assert_status_ok();

    let messages = received_json(&ctx.discord).await;
    assert_eq!(messages[0]["embeds"][0]["title"], "Tracking Update - ESTW100002");
    assert_eq!(messages[0]["embeds"][0]["color"], 0xff0000);
    assert_eq!(field(&messages[0], "Tracking Page"), "Unknown Tracking Page");
}

#[tokio::test]
async fn test_malformed_label_rejected_without_outbound_calls() {
    let ctx = common::create_test_context().await;
    accept_all(&ctx.downstream, 200, 0).await;
    accept_all(&ctx.discord, 204, 0).await;

    let server = common::create_test_server(ctx.state.clone());

    let response = server
        .post("/webhook-label")
        .json(&json!({"event_type": "shipment.label.created"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "malformed_payload");
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let ctx = common::create_test_context().await;
    accept_all(&ctx.downstream, 200, 0).await;
    accept_all(&ctx.discord, 204, 0).await;

    let server = common::create_test_server(ctx.state.clone());

    server
        .post("/webhook")
        .text("not json at all")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_event_on_wrong_route_rejected() {
    let ctx = common::create_test_context().await;
    accept_all(&ctx.downstream, 200, 0).await;
    accept_all(&ctx.discord, 204, 0).await;

    let server = common::create_test_server(ctx.state.clone());

    server
        .post("/webhook")
        .json(&label_event("success"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_downstream_failure_still_accepted_and_reported() {
    let ctx = common::create_test_context().await;
    accept_all(&ctx.downstream, 503, 1).await;
    accept_all(&ctx.discord, 204, 1).await;

    let server = common::create_test_server(ctx.state.clone());

    server
        .post("/webhook-label")
        .json(&label_event("success"))
        .await
        .assert_status_ok();

    let messages = received_json(&ctx.discord).await;
    assert_eq!(
        field(&messages[0], "API Forwarding Status"),
        "Failed - Request failed with status code 503"
    );
}

#[tokio::test]
async fn test_notification_failure_sends_fallback() {
    let ctx = common::create_test_context().await;
    accept_all(&ctx.downstream, 200, 1).await;
    accept_all(&ctx.discord, 400, 2).await;

    let server = common::create_test_server(ctx.state.clone());

    server
        .post("/webhook")
        .json(&tracking_event("Delivered"))
        .await
        .assert_status_ok();

    let messages = received_json(&ctx.discord).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[1]["content"],
        "Failed to deliver notification for Tracking Update - ESTW100002: Request failed with status code 400"
    );
}

#[tokio::test]
async fn test_repeated_webhook_relayed_each_time() {
    let ctx = common::create_test_context().await;
    accept_all(&ctx.downstream, 200, 2).await;
    accept_all(&ctx.discord, 204, 2).await;

    let server = common::create_test_server(ctx.state.clone());
    let payload = tracking_event("In Transit");

    for _ in 0..2 {
        server
            .post("/webhook")
            .json(&payload)
            .await
            .assert_status_ok();
    }
}
