//! Versioned storage for the site document
//!
//! A store holds exactly one document and a version counter. Writes are
//! conditional on the version the caller read, so two writers racing from the
//! same snapshot cannot both succeed.

mod memory;
mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;
use folio_common::{Result, SiteConfig, Versioned};

#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Reads the document and its version.
    ///
    /// An absent row yields version `0` and the empty document.
    async fn load(&self) -> Result<Versioned>;

    /// Replaces the document if the stored version still equals `expected`.
    ///
    /// Returns the new version, or `FolioError::VersionConflict` when another
    /// writer got there first.
    async fn save(&self, expected: u64, config: &SiteConfig) -> Result<u64>;
}
