//! HTTP implementation of the shipping API gateway.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::client::describe_error;
use super::throttle::OutboundThrottle;
use crate::domain::gateways::ShippingApi;
use crate::error::AppError;

/// Easyship REST client.
///
/// Postal codes are fetched anonymously from `{postal_code_base_url}/{id}`;
/// item categories are fetched with the API key as a bearer token. Both calls
/// pass through the optional [`OutboundThrottle`].
pub struct EasyshipClient {
    client: Client,
    postal_code_base_url: String,
    item_categories_url: String,
    api_key: String,
    throttle: Option<Arc<OutboundThrottle>>,
}

impl EasyshipClient {
    pub fn new(
        client: Client,
        postal_code_base_url: impl Into<String>,
        item_categories_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            postal_code_base_url: postal_code_base_url.into(),
            item_categories_url: item_categories_url.into(),
            api_key: api_key.into(),
            throttle: None,
        }
    }

    /// Routes every upstream call through `throttle`.
    pub fn with_throttle(mut self, throttle: Arc<OutboundThrottle>) -> Self {
        self.throttle = Some(throttle);
        self
    }

    fn postal_code_url(&self, id: &str) -> String {
        format!("{}/{}", self.postal_code_base_url.trim_end_matches('/'), id)
    }

    /// Sends `request` and decodes a 2xx JSON body.
    async fn fetch_json(&self, request: RequestBuilder, resource: &str) -> Result<Value, AppError> {
        if let Some(throttle) = &self.throttle {
            throttle.acquire().await?;
        }

        let response = request.send().await.map_err(|e| {
            let timed_out = e.is_timeout();
            let message = format!("{} request failed: {}", resource, describe_error(e));
            warn!(resource, timed_out, "{}", message);
            if timed_out {
                AppError::upstream_timeout(message)
            } else {
                AppError::upstream_unavailable(message)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            warn!(resource, status = status.as_u16(), "Upstream rejected request");
            return Err(AppError::upstream_rejected(status.as_u16(), body));
        }

        debug!(resource, status = status.as_u16(), "Upstream request succeeded");

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                AppError::upstream_timeout(format!("{} response timed out", resource))
            } else {
                AppError::upstream_unavailable(format!(
                    "{} returned an invalid JSON body: {}",
                    resource,
                    describe_error(e)
                ))
            }
        })
    }
}

#[async_trait]
impl ShippingApi for EasyshipClient {
    async fn fetch_postal_code(&self, id: &str) -> Result<Value, AppError> {
        let request = self.client.get(self.postal_code_url(id));
        self.fetch_json(request, "postal_code").await
    }

    async fn fetch_item_categories(&self) -> Result<Value, AppError> {
        let request = self
            .client
            .get(&self.item_categories_url)
            .bearer_auth(&self.api_key);
        self.fetch_json(request, "item_categories").await
    }
}

/// Reads an error body as JSON, falling back to text or `null`.
async fn error_body(response: Response) -> Value {
    match response.text().await {
        Ok(text) if text.trim().is_empty() => Value::Null,
        Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        Err(_) => Value::Null,
    }
}
