//! Gateway trait for the upstream shipping API.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

/// Read-only access to the upstream shipping API.
///
/// Implementations return the upstream JSON document verbatim.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::EasyshipClient`] - reqwest-based client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShippingApi: Send + Sync {
    /// Fetches a postal code document by its numeric identifier.
    ///
    /// # Errors
    ///
    /// - [`AppError::UpstreamUnavailable`] on network failure or timeout
    /// - [`AppError::UpstreamRejected`] on a non-2xx response
    /// - [`AppError::RateLimited`] if the outbound budget is exhausted
    async fn fetch_postal_code(&self, id: &str) -> Result<Value, AppError>;

    /// Fetches the item-category (HS code) listing.
    ///
    /// # Errors
    ///
    /// Same as [`ShippingApi::fetch_postal_code`].
    async fn fetch_item_categories(&self) -> Result<Value, AppError>;
}
