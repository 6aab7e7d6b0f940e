//! Inbound shipping webhook payloads.
//!
//! Easyship posts two differently shaped callbacks: label events (a label was
//! generated or failed) and tracking updates. [`WebhookPayload::classify`] is
//! the single place that decides which one a raw body is.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use std::fmt;

use crate::error::AppError;

/// The variant a webhook body was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Label,
    Tracking,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label => write!(f, "label"),
            Self::Tracking => write!(f, "tracking"),
        }
    }
}

/// Label generation callback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelEvent {
    #[serde(deserialize_with = "any_as_string")]
    pub event_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resource_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resource_id: Option<String>,
    pub label: LabelDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LabelDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub easyship_shipment_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub platform_order_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tracking_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tracking_page_url: Option<String>,
}

/// Tracking status callback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackingEvent {
    pub tracking_status: TrackingDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackingDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub platform_order_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub easyship_shipment_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tracking_page_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tracking_number: Option<String>,
}

/// A classified webhook body.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    Label(LabelEvent),
    Tracking(TrackingEvent),
}

impl WebhookPayload {
    /// Classifies a raw request body.
    ///
    /// A body is a label event when it carries a non-empty `event_type` and a
    /// `label` object, and a tracking event when it carries a
    /// `tracking_status` object. Bodies matching neither or both are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MalformedPayload`] if the body is not a JSON object
    /// or cannot be classified into exactly one variant.
    pub fn classify(raw: &[u8]) -> Result<Self, AppError> {
        let value: Value = serde_json::from_slice(raw).map_err(|e| {
            AppError::malformed_payload(
                "Payload is not valid JSON",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let Some(object) = value.as_object() else {
            return Err(AppError::malformed_payload(
                "Payload must be a JSON object",
                json!({}),
            ));
        };

        let has_event_type = object.get("event_type").is_some_and(is_present);
        let has_label = object.get("label").is_some_and(Value::is_object);
        let has_tracking = object.get("tracking_status").is_some_and(Value::is_object);

        match (has_event_type && has_label, has_tracking) {
            (true, false) => serde_json::from_value(value)
                .map(Self::Label)
                .map_err(invalid_shape),
            (false, true) => serde_json::from_value(value)
                .map(Self::Tracking)
                .map_err(invalid_shape),
            (true, true) => Err(AppError::malformed_payload(
                "Payload matches more than one event type",
                json!({ "matched": ["label", "tracking"] }),
            )),
            (false, false) => {
                let mut missing = Vec::new();
                if !has_tracking {
                    if !has_event_type {
                        missing.push("event_type");
                    }
                    if !has_label {
                        missing.push("label");
                    }
                }
                Err(AppError::malformed_payload(
                    "Invalid payload format",
                    json!({
                        "missing": missing,
                        "expected_one_of": [["event_type", "label"], ["tracking_status"]],
                    }),
                ))
            }
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Label(_) => EventKind::Label,
            Self::Tracking(_) => EventKind::Tracking,
        }
    }

    pub fn shipment_id(&self) -> Option<&str> {
        match self {
            Self::Label(e) => e.label.easyship_shipment_id.as_deref(),
            Self::Tracking(e) => e.tracking_status.easyship_shipment_id.as_deref(),
        }
    }

    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Label(e) => e.label.status.as_deref(),
            Self::Tracking(e) => e.tracking_status.status.as_deref(),
        }
    }
}

fn invalid_shape(e: serde_json::Error) -> AppError {
    AppError::malformed_payload("Invalid payload format", json!({ "reason": e.to_string() }))
}

/// Mirrors JavaScript truthiness for the discriminator check.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Accepts strings, numbers and booleans; everything else becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Renders any JSON value as text; strings are kept verbatim.
fn any_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}
