//! Application error type and its HTTP representation.
//!
//! Every failure that can reach a client is an [`AppError`]. Handlers return
//! `Result<_, AppError>` and axum renders the error through [`IntoResponse`]
//! as:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "upstream_rejected",
//!     "message": "Upstream returned 404",
//!     "details": { "error": "postal code not found" }
//!   }
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller-supplied lookup key failed validation.
    #[error("{message}")]
    InvalidKey { message: String, details: Value },

    /// Webhook body does not carry the discriminator fields of a known event.
    #[error("{message}")]
    MalformedPayload { message: String, details: Value },

    /// Upstream could not be reached, or did not answer in time.
    #[error("{message}")]
    UpstreamUnavailable { message: String, timed_out: bool },

    /// Upstream answered with a non-2xx status.
    #[error("Upstream returned {status}")]
    UpstreamRejected { status: u16, body: Value },

    /// Outbound or inbound request budget exhausted.
    #[error("{message}")]
    RateLimited { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_key(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidKey {
            message: message.into(),
            details,
        }
    }

    pub fn malformed_payload(message: impl Into<String>, details: Value) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            details,
        }
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn upstream_timeout(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn upstream_rejected(status: u16, body: Value) -> Self {
        Self::UpstreamRejected { status, body }
    }

    pub fn rate_limited(message: impl Into<String>, details: Value) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    ///
    /// `UpstreamRejected` mirrors the upstream status; an out-of-range code
    /// falls back to `502 Bad Gateway`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidKey { .. } | AppError::MalformedPayload { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::UpstreamUnavailable { timed_out, .. } => {
                if *timed_out {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                }
            }
            AppError::UpstreamRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the client-facing payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::InvalidKey { message, details } => ErrorInfo {
                code: "invalid_key",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::MalformedPayload { message, details } => ErrorInfo {
                code: "malformed_payload",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::UpstreamUnavailable { message, timed_out } => ErrorInfo {
                code: "upstream_unavailable",
                message: message.clone(),
                details: json!({ "timed_out": timed_out }),
            },
            AppError::UpstreamRejected { status, body } => ErrorInfo {
                code: "upstream_rejected",
                message: format!("Upstream returned {}", status),
                details: body.clone(),
            },
            AppError::RateLimited { message, details } => ErrorInfo {
                code: "rate_limited",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Internal { message, details } => ErrorInfo {
                code: "internal_error",
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
