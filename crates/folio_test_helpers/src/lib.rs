//! Shared test utilities for Folio test suites
//!
//! # Modules
//!
//! - [`fixtures`]: sample documents and temporary config files
//! - [`cli`]: Command builders with pre-configured environments
//! - [`logging`]: Test logging configuration
//! - [`assertions`]: Domain-specific assertion helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_test_helpers::prelude::*;
//!
//! fn my_test() {
//!     let doc = sample_config();
//!     assert_eq!(doc.pages.len(), 2);
//!
//!     folio_command()
//!         .arg("--help")
//!         .assert()
//!         .success();
//! }
//! ```

pub mod assertions;
pub mod cli;
pub mod fixtures;
pub mod logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::cli::{command_for, folio_command};
    pub use crate::fixtures::{config_file, page, sample_config, sidebar_item, temp_dir};
    pub use crate::logging::{init_test_logging, suppress_logs};
}
