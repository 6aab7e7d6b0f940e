//! Business logic services for the application layer.

pub mod lookup_service;
pub mod relay_service;

pub use lookup_service::LookupService;
pub use relay_service::RelayService;
