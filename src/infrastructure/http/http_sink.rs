//! HTTP implementation of a webhook sink.

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use super::client::describe_error;
use crate::domain::entities::Sink;
use crate::domain::gateways::{DeliveryError, WebhookSink};

/// POSTs bodies to one fixed URL.
pub struct HttpSink {
    client: Client,
    url: String,
    sink: Sink,
}

impl HttpSink {
    pub fn new(client: Client, url: impl Into<String>, sink: Sink) -> Self {
        Self {
            client,
            url: url.into(),
            sink,
        }
    }
}

#[async_trait]
impl WebhookSink for HttpSink {
    async fn deliver(&self, body: Bytes) -> Result<u16, DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                let error = describe_error(e);
                warn!(sink = %self.sink, error = %error, "Delivery failed");
                DeliveryError::Transport(error)
            })?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            debug!(sink = %self.sink, status, "Delivered");
            Ok(status)
        } else {
            warn!(sink = %self.sink, status, "Delivery rejected");
            Err(DeliveryError::Status(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::build_http_client;
    use std::time::Duration;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_deliver_posts_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/result"))
            .and(header("content-type", "application/json"))
            .and(body_string(r#"{"a": 1}"#))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let sink = HttpSink::new(
            build_http_client(Duration::from_secs(5)).unwrap(),
            format!("{}/result", server.uri()),
            Sink::Downstream,
        );

        let status = sink.deliver(Bytes::from_static(br#"{"a": 1}"#)).await.unwrap();
        assert_eq!(status, 202);
    }

    #[tokio::test]
    async fn test_deliver_non_2xx_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let sink = HttpSink::new(
            build_http_client(Duration::from_secs(5)).unwrap(),
            server.uri(),
            Sink::Notifier,
        );

        let err = sink.deliver(Bytes::from_static(b"{}")).await.unwrap_err();
        assert_eq!(err, DeliveryError::Status(500));
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }

    #[tokio::test]
    async fn test_deliver_connection_error_hides_url() {
        let sink = HttpSink::new(
            build_http_client(Duration::from_secs(1)).unwrap(),
            "http://127.0.0.1:9/secret-token",
            Sink::Notifier,
        );

        let err = sink.deliver(Bytes::from_static(b"{}")).await.unwrap_err();
        match err {
            DeliveryError::Transport(message) => assert!(!message.contains("secret-token")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
