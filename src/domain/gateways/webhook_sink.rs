//! Gateway trait for fire-and-forget POST targets.

use async_trait::async_trait;
use axum::body::Bytes;

/// Why a delivery did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The target answered with a non-2xx status.
    #[error("Request failed with status code {0}")]
    Status(u16),
    /// The request never got a response (connect error, timeout, ...).
    #[error("{0}")]
    Transport(String),
}

/// A fixed endpoint that accepts JSON bodies.
///
/// Each call is a single attempt; retrying is the caller's decision.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookSink: Send + Sync {
    /// Posts `body` to the sink and returns the response status on success.
    async fn deliver(&self, body: Bytes) -> Result<u16, DeliveryError>;
}
