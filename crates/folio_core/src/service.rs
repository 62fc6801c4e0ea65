//! Read-modify-write façade over a [`ConfigStore`]
//!
//! Each operation loads the document, applies one pure mutation from
//! [`crate::edit`] to the loaded copy and writes it back conditionally on the
//! version it read. Losing a write race reloads and re-applies the mutation,
//! which may then fail validation against the newer document.

use std::sync::Arc;

use folio_common::{FolioError, ItemPatch, NewItem, Result, SiteConfig};
use folio_config::Config;

use crate::edit;
use crate::store::{ConfigStore, SupabaseStore};

/// Default number of attempts before giving up on a contended write
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Result of a successful mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Human-readable confirmation
    pub message: String,
    /// The document as written
    pub config: SiteConfig,
}

/// The config store façade shared by every transport
#[derive(Clone)]
pub struct ConfigService {
    store: Arc<dyn ConfigStore>,
    max_attempts: u32,
}

impl ConfigService {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Service backed by the Supabase row described by `config`
    pub fn connect(config: &Config) -> Result<Self> {
        let store = SupabaseStore::new(&config.supabase, &config.store)?;
        Ok(Self::new(Arc::new(store)).with_max_attempts(config.store.max_attempts))
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Returns the stored document, or the empty document if none exists
    pub async fn get_config(&self) -> Result<SiteConfig> {
        Ok(self.store.load().await?.config)
    }

    /// Adds a page and its sidebar entry
    #[tracing::instrument(skip(self, item), fields(id = %item.id))]
    pub async fn add_item(&self, item: NewItem) -> Result<Outcome> {
        self.mutate("add", |doc| {
            let id = edit::add_item(doc, &item)?;
            Ok(format!("Item '{}' added successfully", id))
        })
        .await
    }

    /// Removes the page and sidebar entry with `id`, whichever exist
    #[tracing::instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> Result<Outcome> {
        self.mutate("delete", |doc| {
            let removed = edit::delete_item(doc, id)?;
            let scope = match (removed.page, removed.sidebar) {
                (true, false) => " (page only)",
                (false, true) => " (sidebar only)",
                _ => "",
            };
            Ok(format!("Item '{}' deleted successfully{}", removed.id, scope))
        })
        .await
    }

    /// Rewrites the entries for `old_id`; omitted fields are kept
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_item(&self, old_id: &str, patch: ItemPatch) -> Result<Outcome> {
        self.mutate("update", |doc| {
            let old = edit::normalize_id(old_id)?;
            let new = edit::update_item(doc, &old, &patch)?;
            if new == old {
                Ok(format!("Item '{}' updated successfully", new))
            } else {
                Ok(format!("Item '{}' renamed to '{}' and updated successfully", old, new))
            }
        })
        .await
    }

    async fn mutate<F>(&self, operation: &'static str, apply: F) -> Result<Outcome>
    where
        F: Fn(&mut SiteConfig) -> Result<String>,
    {
        for attempt in 1..=self.max_attempts {
            let mut current = self.store.load().await?;

            let message = match apply(&mut current.config) {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!(operation, error = %e, "Rejected change");
                    return Err(e);
                }
            };

            match self.store.save(current.version, &current.config).await {
                Ok(version) => {
                    tracing::info!(operation, version, "{}", message);
                    return Ok(Outcome {
                        message,
                        config: current.config,
                    });
                }
                Err(FolioError::VersionConflict) => {
                    tracing::warn!(operation, attempt, "Config changed while writing, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(FolioError::ConcurrentModification {
            attempts: self.max_attempts,
        })
    }
}
