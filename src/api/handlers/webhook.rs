//! Handlers for inbound shipping webhooks.

use axum::{body::Bytes, extract::State};

use crate::domain::entities::EventKind;
use crate::error::AppError;
use crate::state::AppState;

const ACCEPTED: &str = "Payload processed successfully";

/// Relays a tracking status webhook.
///
/// # Endpoint
///
/// `POST /webhook`
///
/// # Response Codes
///
/// - **200 OK**: The payload was classified; forwarding and notification
///   are best-effort and never change the status
/// - **400 Bad Request**: The body is not a tracking event
pub async fn tracking_webhook_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, AppError> {
    state
        .relay_service
        .relay(body, Some(EventKind::Tracking))
        .await?;
    Ok(ACCEPTED)
}

/// Relays a label event webhook.
///
/// # Endpoint
///
/// `POST /webhook-label`
///
/// # Response Codes
///
/// - **200 OK**: The payload was classified and relayed
/// - **400 Bad Request**: The body lacks `event_type` or `label`
pub async fn label_webhook_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, AppError> {
    state
        .relay_service
        .relay(body, Some(EventKind::Label))
        .await?;
    Ok(ACCEPTED)
}
