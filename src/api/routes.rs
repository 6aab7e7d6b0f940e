//! API route configuration.

use crate::api::handlers::{
    hs_code_handler, label_webhook_handler, postal_code_handler, tracking_webhook_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Lookup and webhook routes, without rate limiting.
///
/// # Endpoints
///
/// - `GET  /postal_codes/{id}` - Cached postal code lookup
/// - `GET  /hs-code`           - Item-category listing
/// - `POST /webhook`           - Tracking status webhook
/// - `POST /webhook-label`     - Label event webhook
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/postal_codes/{id}", get(postal_code_handler))
        .route("/hs-code", get(hs_code_handler))
        .route("/webhook", post(tracking_webhook_handler))
        .route("/webhook-label", post(label_webhook_handler))
}
