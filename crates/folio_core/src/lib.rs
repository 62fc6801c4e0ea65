//! Core document logic for Folio
//!
//! - [`edit`]: pure add / delete / update mutations over a [`SiteConfig`]
//! - [`store`]: the versioned storage seam and its backends
//! - [`service`]: the read-modify-write façade the transports call

pub mod edit;
pub mod service;
pub mod store;

pub use edit::{add_item, capitalize_first_letter, delete_item, normalize_id, update_item, Removed};
pub use folio_common::SiteConfig;
pub use service::{ConfigService, Outcome};
pub use store::{ConfigStore, MemoryStore, SupabaseStore};
