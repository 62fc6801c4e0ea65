//! Sample documents and temporary config files

use assert_fs::prelude::*;
use assert_fs::TempDir;
use folio_common::{Page, SidebarItem, SiteConfig};

/// Create a temporary directory for testing
///
/// The directory is removed when the `TempDir` is dropped.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// A page with empty content
pub fn page(id: &str, title: &str) -> Page {
    Page {
        id: id.to_string(),
        title: title.to_string(),
        content: Some(String::new()),
    }
}

/// An inactive sidebar entry
pub fn sidebar_item(id: &str, label: &str) -> SidebarItem {
    SidebarItem {
        id: id.to_string(),
        label: label.to_string(),
        active: Some(false),
    }
}

/// Two items, `home` and `blog`, present in both sequences
///
/// # Example
///
/// ```rust
/// use folio_test_helpers::fixtures::sample_config;
///
/// let doc = sample_config();
/// assert_eq!(doc.sidebar[1].id, "blog");
/// ```
pub fn sample_config() -> SiteConfig {
    SiteConfig {
        pages: vec![page("home", "Home"), page("blog", "Blog")],
        sidebar: vec![sidebar_item("home", "Home"), sidebar_item("blog", "Blog")],
    }
}

/// Write `content` as `folio.toml` in a fresh temp directory
///
/// Returns the directory (keep it alive for the duration of the test) and
/// the path of the file as a string, ready for `FOLIO_CONFIG`.
pub fn config_file(content: &str) -> (TempDir, String) {
    let temp = temp_dir();
    let file = temp.child("folio.toml");
    file.write_str(content).expect("Failed to write config file");
    let path = file.path().display().to_string();
    (temp, path)
}
