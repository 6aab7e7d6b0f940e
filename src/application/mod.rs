//! Application layer services implementing business logic.
//!
//! Services orchestrate domain logic over the gateway traits and the cache,
//! and give HTTP handlers a small API to call.
//!
//! # Available Services
//!
//! - [`services::lookup_service::LookupService`] - Cache-aside postal code and item-category lookups
//! - [`services::relay_service::RelayService`] - Best-effort webhook forwarding and notification

pub mod services;
