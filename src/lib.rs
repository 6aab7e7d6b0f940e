//! # Postal Relay
//!
//! A small integration gateway in front of a shipping provider, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Webhook payloads, notifications, cache entries and gateway traits
//! - **Application Layer** ([`application`]) - Cache-aside lookups and webhook relaying
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory cache and outbound HTTP clients
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Postal code lookups cached in memory with a fixed TTL
//! - Item-category passthrough with server-side credentials
//! - Label and tracking webhooks forwarded downstream and announced in chat
//! - Per-IP rate limiting and optional upstream throttling
//!
//! ## Quick Start
//!
//! ```bash
//! export POSTAL_CODE_BASE_URL="https://api.example.com/postal_codes/"
//! export ITEM_CATEGORIES_URL="https://api.example.com/item_categories"
//! export EASYSHIP_API_KEY="..."
//! export FORWARDING_API_URL="https://downstream.example.com/result"
//! export DISCORD_WEBHOOK_URL="https://discord.com/api/webhooks/..."
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LookupService, RelayService};
    pub use crate::domain::entities::{EventKind, RelayReport, WebhookPayload};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
