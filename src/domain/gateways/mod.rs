//! Outbound gateway traits.
//!
//! The services talk to the outside world only through these traits.
//! HTTP implementations live in `crate::infrastructure::http`; mocks are
//! generated with `mockall` for unit tests.
//!
//! - [`ShippingApi`] - Easyship postal-code and item-category endpoints
//! - [`WebhookSink`] - A fixed POST target (downstream results, chat channel)

pub mod shipping_api;
pub mod webhook_sink;

pub use shipping_api::ShippingApi;
pub use webhook_sink::{DeliveryError, WebhookSink};

#[cfg(test)]
pub use shipping_api::MockShippingApi;
#[cfg(test)]
pub use webhook_sink::MockWebhookSink;
