//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LookupService, RelayService};

#[derive(Clone)]
pub struct AppState {
    pub lookup_service: Arc<LookupService>,
    pub relay_service: Arc<RelayService>,
}

impl AppState {
    pub fn new(lookup_service: Arc<LookupService>, relay_service: Arc<RelayService>) -> Self {
        Self {
            lookup_service,
            relay_service,
        }
    }
}
