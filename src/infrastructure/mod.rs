//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for caching and outbound HTTP.
//!
//! # Modules
//!
//! - [`cache`] - In-memory TTL cache, no-op cache and the expiry sweeper
//! - [`http`] - reqwest client, Easyship gateway, webhook sinks and throttling

pub mod cache;
pub mod http;
