//! Data Transfer Objects for API responses.
//!
//! Lookup endpoints return upstream documents verbatim, so only the service's
//! own responses need DTOs.

pub mod health;
