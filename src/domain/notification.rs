//! Chat notification rendering for relayed webhooks.
//!
//! Produces a Discord-compatible message with a single embed. The embed shape
//! is stable: every field is always present, and missing payload values are
//! rendered as `Unknown <Field>` instead of being dropped.

use serde::Serialize;

use crate::domain::entities::{LabelEvent, RelayOutcome, TrackingEvent, WebhookPayload};

/// Embed colour for success-like statuses.
pub const SUCCESS_COLOR: u32 = 0x00ff00;
/// Embed colour for every other status.
pub const FAILURE_COLOR: u32 = 0xff0000;

/// Discord rejects field values longer than this.
const MAX_FIELD_LEN: usize = 1024;
/// Discord rejects embed titles longer than this.
const MAX_TITLE_LEN: usize = 256;

/// Statuses rendered with [`SUCCESS_COLOR`], compared case-insensitively.
const SUCCESS_STATUSES: &[&str] = &["success", "delivered"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: truncate(value.into(), MAX_FIELD_LEN),
            inline,
        }
    }

    /// Field whose value falls back to `Unknown <name>`.
    fn or_unknown(name: &str, value: Option<&str>, inline: bool) -> Self {
        Self::new(name, or_unknown(name, value), inline)
    }

    /// Markdown link field, or `Unknown <name>` without a URL.
    fn link(name: &str, text: &str, url: Option<&str>) -> Self {
        let value = match url {
            Some(url) => format!("[{}]({})", text, url),
            None => format!("Unknown {}", name),
        };
        Self::new(name, value, false)
    }
}

impl Notification {
    /// Minimal message sent when the full notification could not be delivered.
    pub fn fallback(title: &str, error: &str) -> Self {
        Self {
            content: Some(truncate(
                format!("Failed to deliver notification for {}: {}", title, error),
                MAX_FIELD_LEN,
            )),
            embeds: Vec::new(),
        }
    }

    /// Title of the first embed, if any.
    pub fn title(&self) -> Option<&str> {
        self.embeds.first().map(|e| e.title.as_str())
    }
}

/// Returns true if `status` counts as a success for colouring.
pub fn is_success_status(status: Option<&str>) -> bool {
    status.is_some_and(|s| {
        SUCCESS_STATUSES
            .iter()
            .any(|candidate| s.trim().eq_ignore_ascii_case(candidate))
    })
}

/// Builds the notification for a classified payload and its forward outcome.
pub fn build_notification(payload: &WebhookPayload, forward: &RelayOutcome) -> Notification {
    let color = if is_success_status(payload.status()) {
        SUCCESS_COLOR
    } else {
        FAILURE_COLOR
    };

    let (title, mut fields) = match payload {
        WebhookPayload::Label(event) => label_embed(event),
        WebhookPayload::Tracking(event) => tracking_embed(event),
    };

    fields.push(EmbedField::new(
        "API Forwarding Status",
        forward.summary(),
        false,
    ));

    Notification {
        content: None,
        embeds: vec![Embed {
            title,
            color,
            fields,
        }],
    }
}

fn label_embed(event: &LabelEvent) -> (String, Vec<EmbedField>) {
    let label = &event.label;
    let title = truncate(
        format!(
            "Label Event - {}",
            or_unknown("Shipment ID", label.easyship_shipment_id.as_deref())
        ),
        MAX_TITLE_LEN,
    );

    let fields = vec![
        EmbedField::new("Event Type", event.event_type.as_str(), true),
        EmbedField::or_unknown("Resource Type", event.resource_type.as_deref(), true),
        EmbedField::or_unknown("Resource ID", event.resource_id.as_deref(), true),
        EmbedField::or_unknown(
            "Easyship Shipment ID",
            label.easyship_shipment_id.as_deref(),
            false,
        ),
        EmbedField::or_unknown(
            "Platform Order Number",
            label.platform_order_number.as_deref(),
            false,
        ),
        EmbedField::or_unknown("Status", label.status.as_deref(), true),
        EmbedField::link("Label URL", "Download Label", label.label_url.as_deref()),
        EmbedField::or_unknown("Tracking Number", label.tracking_number.as_deref(), true),
        EmbedField::link(
            "Tracking Page",
            "Track Shipment",
            label.tracking_page_url.as_deref(),
        ),
    ];

    (title, fields)
}

fn tracking_embed(event: &TrackingEvent) -> (String, Vec<EmbedField>) {
    let status = &event.tracking_status;
    let title = truncate(
        format!(
            "Tracking Update - {}",
            or_unknown("Shipment ID", status.easyship_shipment_id.as_deref())
        ),
        MAX_TITLE_LEN,
    );

    let fields = vec![
        EmbedField::or_unknown(
            "Easyship Shipment ID",
            status.easyship_shipment_id.as_deref(),
            false,
        ),
        EmbedField::or_unknown(
            "Platform Order Number",
            status.platform_order_number.as_deref(),
            false,
        ),
        EmbedField::or_unknown("Status", status.status.as_deref(), true),
        EmbedField::or_unknown("Tracking Number", status.tracking_number.as_deref(), true),
        EmbedField::link(
            "Tracking Page",
            "Track Shipment",
            status.tracking_page_url.as_deref(),
        ),
    ];

    (title, fields)
}

fn or_unknown(name: &str, value: Option<&str>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => format!("Unknown {}", name),
    }
}

fn truncate(mut value: String, max: usize) -> String {
    if value.chars().count() > max {
        value = value.chars().take(max - 3).collect();
        value.push_str("...");
    }
    value
}
