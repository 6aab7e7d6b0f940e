//! Outbound HTTP integrations.
//!
//! - [`client`] - Shared reqwest client with timeout and JSON headers
//! - [`throttle`] - Token-bucket limiter for upstream calls
//! - [`easyship_client`] - [`crate::domain::gateways::ShippingApi`] over HTTP
//! - [`http_sink`] - [`crate::domain::gateways::WebhookSink`] over HTTP

pub mod client;
pub mod easyship_client;
pub mod http_sink;
pub mod throttle;

pub use client::build_http_client;
pub use easyship_client::EasyshipClient;
pub use http_sink::HttpSink;
pub use throttle::OutboundThrottle;
