//! Handler for the item-category (HS code) listing.

use axum::{Json, extract::State};
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

/// Returns the upstream item-category listing.
///
/// # Endpoint
///
/// `GET /hs-code`
///
/// The outbound request carries the configured API key as a bearer token.
///
/// # Errors
///
/// Same upstream error mapping as [`super::postal_code_handler`].
pub async fn hs_code_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let document = state.lookup_service.item_categories().await?;
    Ok(Json(document))
}
