pub mod items;
pub mod server;

use anyhow::Result;
use folio_config::Config;
use folio_core::{ConfigService, MemoryStore};
use std::sync::Arc;

/// Service for the current settings; `memory` skips Supabase entirely
fn open_service(memory: bool) -> Result<(Config, ConfigService)> {
    if memory {
        let config = Config::load_settings()?;
        tracing::warn!("Using in-memory store, changes are lost on exit");
        let service = ConfigService::new(Arc::new(MemoryStore::new()))
            .with_max_attempts(config.store.max_attempts);
        return Ok((config, service));
    }

    let config = Config::load()?;
    let service = ConfigService::connect(&config)?;
    Ok((config, service))
}
