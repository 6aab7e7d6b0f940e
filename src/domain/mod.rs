//! Domain layer containing entities, gateway contracts and pure logic.
//!
//! Nothing here performs I/O directly.
//!
//! # Architecture
//!
//! - [`entities`] - Cache entries, webhook payloads and relay outcomes
//! - [`gateways`] - Traits for the upstream API and outbound sinks
//! - [`clock`] - Injectable time source for cache expiry
//! - [`notification`] - Builds the chat notification for a relayed webhook
//!
//! # Relay Flow
//!
//! 1. HTTP handler passes the raw body to [`crate::application::services::RelayService`]
//! 2. [`entities::WebhookPayload::classify`] picks the variant or rejects the body
//! 3. The raw body is forwarded through a [`gateways::WebhookSink`]
//! 4. [`notification::build_notification`] renders the chat message
//! 5. The message is delivered through a second [`gateways::WebhookSink`]

pub mod clock;
pub mod entities;
pub mod gateways;
pub mod notification;
