//! Shared application state.

use std::{sync::Arc, time::Duration};

use folio_config::Config;
use folio_core::{ConfigService, MemoryStore};

/// Handed to every handler by axum
#[derive(Clone)]
pub struct AppState {
    pub service: ConfigService,
    /// Upper bound on the time spent serving one request
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(service: ConfigService) -> Self {
        Self {
            service,
            request_timeout: Duration::from_secs(10),
        }
    }

    /// State for the settings in `config`, backed by its Supabase row
    pub fn from_config(config: &Config) -> folio_common::Result<Self> {
        let service = ConfigService::connect(config)?;
        Ok(Self::new(service).with_request_timeout(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for AppState {
    /// Backed by an empty in-memory store
    fn default() -> Self {
        Self::new(ConfigService::new(Arc::new(MemoryStore::new())))
    }
}
