//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod hs_code;
pub mod postal_codes;
pub mod webhook;

pub use health::health_handler;
pub use hs_code::hs_code_handler;
pub use postal_codes::postal_code_handler;
pub use webhook::{label_webhook_handler, tracking_webhook_handler};
