//! Handler for postal code lookups.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

/// Returns the upstream postal code document for a numeric ID.
///
/// # Endpoint
///
/// `GET /postal_codes/{id}`
///
/// Served from cache when a live entry exists; otherwise fetched from the
/// upstream API and cached for the configured TTL.
///
/// # Errors
///
/// - **400** if `id` is not all digits
/// - Upstream status mirrored on a non-2xx upstream response
/// - **502** / **504** if the upstream is unreachable or times out
/// - **429** if the outbound request budget is exhausted
pub async fn postal_code_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let document = state.lookup_service.postal_code(&id).await?;
    Ok(Json(document))
}
