//! Core domain entities.
//!
//! Plain data structures shared by the services and the HTTP layer.
//!
//! - [`CacheEntry`] - A cached upstream document with an expiry
//! - [`WebhookPayload`] - A classified shipping webhook body
//! - [`RelayOutcome`] / [`RelayReport`] - Results of relaying a webhook

pub mod cache_entry;
pub mod relay;
pub mod webhook;

pub use cache_entry::CacheEntry;
pub use relay::{RelayOutcome, RelayReport, Sink};
pub use webhook::{
    EventKind, LabelDetails, LabelEvent, TrackingDetails, TrackingEvent, WebhookPayload,
};
