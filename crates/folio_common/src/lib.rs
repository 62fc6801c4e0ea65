//! Common types and errors for Folio
//!
//! This crate provides the site document model, the item inputs accepted by
//! every transport, and the error type shared by all Folio components.

pub mod sanitizer;
pub mod telemetry;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core error types for Folio operations
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Item with id '{id}' already exists")]
    DuplicateId { id: String },

    #[error("Item with id '{id}' not found")]
    NotFound { id: String },

    #[error("Failed to read config: {0}")]
    StoreRead(String),

    #[error("Failed to save config: {0}")]
    StoreWrite(String),

    #[error("Config version changed since it was read")]
    VersionConflict,

    #[error("Config was modified concurrently; gave up after {attempts} attempts")]
    ConcurrentModification { attempts: u32 },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Broad classification used by transports to pick a response shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected input: bad shape, duplicate id, unknown id
    Validation,
    /// The backing store failed or kept changing underneath us
    Storage,
    /// Anything else
    Internal,
}

impl FolioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FolioError::InvalidInput(_)
            | FolioError::DuplicateId { .. }
            | FolioError::NotFound { .. } => ErrorKind::Validation,
            FolioError::StoreRead(_)
            | FolioError::StoreWrite(_)
            | FolioError::VersionConflict
            | FolioError::ConcurrentModification { .. } => ErrorKind::Storage,
            FolioError::ConfigError(_) | FolioError::IoError(_) | FolioError::JsonError(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// A content page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub id: String,

    pub title: String,

    /// Older documents may omit content entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A navigation entry shown in the sidebar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SidebarItem {
    pub id: String,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// The site document: pages plus the sidebar that links to them
///
/// Both sequences are keyed by id but are otherwise independent; an id may
/// be present in one and missing from the other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub pages: Vec<Page>,

    #[serde(default)]
    pub sidebar: Vec<SidebarItem>,
}

impl SiteConfig {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.sidebar.is_empty()
    }
}

/// A document together with the store version it was read at
///
/// Version `0` means no row has been written yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Versioned {
    pub version: u64,
    pub config: SiteConfig,
}

/// Arguments of `addItem`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
pub struct NewItem {
    /// Identifier shared by the page and its sidebar entry
    pub id: String,

    /// Page title (defaults to "Page {id}")
    #[serde(default)]
    pub title: Option<String>,

    /// Sidebar label (defaults to the id with its first letter capitalized)
    #[serde(default)]
    pub label: Option<String>,

    /// Page body (defaults to an empty string)
    #[serde(default)]
    pub content: Option<String>,

    /// Whether the sidebar entry is highlighted (defaults to false)
    #[serde(default)]
    pub active: Option<bool>,
}

/// Arguments of `deleteItem`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DeleteItem {
    /// Identifier of the page and sidebar entry to remove
    pub id: String,
}

/// Replacement values for an existing item; omitted fields keep their value
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
pub struct ItemPatch {
    /// New identifier (renames the item)
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub active: Option<bool>,
}

/// Arguments of `updateItem`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UpdateItem {
    /// Identifier of the item to change
    #[serde(rename = "oldId")]
    pub old_id: String,

    /// Fields to replace
    #[serde(rename = "newItem", default)]
    pub new_item: ItemPatch,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FolioError>;

/// Exit code constants
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
