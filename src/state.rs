//! Shared application state for the HTTP handlers.

use std::sync::Arc;

use crate::config::ServerConfig;

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Arc::new(Self { config })
    }
}
