//! In-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use folio_common::{FolioError, Result, SiteConfig, Versioned};
use tokio::sync::RwLock;

use super::ConfigStore;

/// In-memory storage backend for tests and local development.
///
/// Data is not persisted and is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<Versioned>>,
}

impl MemoryStore {
    /// Creates an empty store (version 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `config` at version 1.
    pub fn with_config(config: SiteConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(Versioned { version: 1, config })),
        }
    }

    /// Current contents, bypassing the trait.
    pub async fn snapshot(&self) -> Versioned {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn load(&self) -> Result<Versioned> {
        Ok(self.state.read().await.clone())
    }

    async fn save(&self, expected: u64, config: &SiteConfig) -> Result<u64> {
        let mut state = self.state.write().await;
        if state.version != expected {
            return Err(FolioError::VersionConflict);
        }
        state.version += 1;
        state.config = config.clone();
        Ok(state.version)
    }
}
