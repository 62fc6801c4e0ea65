//! Pure mutations over the site document
//!
//! Every function here validates fully before touching the document, so on
//! `Err` the document is exactly as it was passed in. Ids are normalized
//! (trimmed, lowercased) at this boundary, both for what gets stored and for
//! every duplicate check.

use folio_common::{FolioError, ItemPatch, NewItem, Page, Result, SidebarItem, SiteConfig};

/// Canonical form of an item id
pub fn normalize_id(raw: &str) -> Result<String> {
    let id = raw.trim().to_lowercase();
    if id.is_empty() {
        return Err(FolioError::InvalidInput("id cannot be empty".to_string()));
    }
    Ok(id)
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title given to a page added without one
pub fn default_title(id: &str) -> String {
    format!("Page {}", id)
}

fn same_id(stored: &str, id: &str) -> bool {
    stored.trim().to_lowercase() == id
}

fn page_index(doc: &SiteConfig, id: &str) -> Option<usize> {
    doc.pages.iter().position(|p| same_id(&p.id, id))
}

fn sidebar_index(doc: &SiteConfig, id: &str) -> Option<usize> {
    doc.sidebar.iter().position(|s| same_id(&s.id, id))
}

fn contains_id(doc: &SiteConfig, id: &str) -> bool {
    page_index(doc, id).is_some() || sidebar_index(doc, id).is_some()
}

/// Append a page and its sidebar entry
///
/// Returns the normalized id that was stored.
pub fn add_item(doc: &mut SiteConfig, item: &NewItem) -> Result<String> {
    let id = normalize_id(&item.id)?;
    if contains_id(doc, &id) {
        return Err(FolioError::DuplicateId { id });
    }

    doc.pages.push(Page {
        id: id.clone(),
        title: item.title.clone().unwrap_or_else(|| default_title(&id)),
        content: Some(item.content.clone().unwrap_or_default()),
    });
    doc.sidebar.push(SidebarItem {
        id: id.clone(),
        label: item.label.clone().unwrap_or_else(|| capitalize_first_letter(&id)),
        active: Some(item.active.unwrap_or(false)),
    });

    Ok(id)
}

/// What a delete actually removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub id: String,
    pub page: bool,
    pub sidebar: bool,
}

/// Remove every page and sidebar entry matching `id`
///
/// Legacy documents may hold several spellings of one id; all of them go.
pub fn delete_item(doc: &mut SiteConfig, id: &str) -> Result<Removed> {
    let id = normalize_id(id)?;
    if !contains_id(doc, &id) {
        return Err(FolioError::NotFound { id });
    }

    let pages = doc.pages.len();
    let sidebar = doc.sidebar.len();
    doc.pages.retain(|p| !same_id(&p.id, &id));
    doc.sidebar.retain(|s| !same_id(&s.id, &id));

    Ok(Removed {
        page: doc.pages.len() < pages,
        sidebar: doc.sidebar.len() < sidebar,
        id,
    })
}

/// Rewrite the entries matching `old_id` in place
///
/// Omitted patch fields keep the entry's current value. Returns the id the
/// entries carry afterwards.
pub fn update_item(doc: &mut SiteConfig, old_id: &str, patch: &ItemPatch) -> Result<String> {
    let old_id = normalize_id(old_id)?;
    let new_id = match &patch.id {
        Some(raw) => normalize_id(raw)?,
        None => old_id.clone(),
    };

    let page = page_index(doc, &old_id);
    let sidebar = sidebar_index(doc, &old_id);
    if page.is_none() && sidebar.is_none() {
        return Err(FolioError::NotFound { id: old_id });
    }
    if new_id != old_id && contains_id(doc, &new_id) {
        return Err(FolioError::DuplicateId { id: new_id });
    }

    if let Some(i) = page {
        let entry = &mut doc.pages[i];
        entry.id = new_id.clone();
        if let Some(title) = &patch.title {
            entry.title = title.clone();
        }
        if let Some(content) = &patch.content {
            entry.content = Some(content.clone());
        }
    }
    if let Some(i) = sidebar {
        let entry = &mut doc.sidebar[i];
        entry.id = new_id.clone();
        if let Some(label) = &patch.label {
            entry.label = label.clone();
        }
        if let Some(active) = patch.active {
            entry.active = Some(active);
        }
    }

    Ok(new_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str) -> NewItem {
        NewItem {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn doc_with(ids: &[&str]) -> SiteConfig {
        let mut doc = SiteConfig::default();
        for id in ids {
            add_item(&mut doc, &item(id)).unwrap();
        }
        doc
    }

    #[test]
    fn test_capitalize_first_letter() {
        assert_eq!(capitalize_first_letter("home"), "Home");
        assert_eq!(capitalize_first_letter("über"), "Über");
        assert_eq!(capitalize_first_letter("a-b"), "A-b");
        assert_eq!(capitalize_first_letter(""), "");
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("  Home ").unwrap(), "home");
        assert!(normalize_id("   ").is_err());
    }

    #[test]
    fn test_add_matches_documented_example() {
        let mut doc = SiteConfig::default();
        let new = NewItem {
            id: "home".to_string(),
            title: Some("Home".to_string()),
            ..Default::default()
        };
        add_item(&mut doc, &new).unwrap();

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "pages": [{ "id": "home", "title": "Home", "content": "" }],
                "sidebar": [{ "id": "home", "label": "Home", "active": false }]
            })
        );
    }

    #[test]
    fn test_add_defaults() {
        let mut doc = SiteConfig::default();
        let id = add_item(&mut doc, &item("Blog")).unwrap();

        assert_eq!(id, "blog");
        assert_eq!(doc.pages[0].title, "Page blog");
        assert_eq!(doc.sidebar[0].label, "Blog");
        assert_eq!(doc.sidebar[0].active, Some(false));
    }

    #[test]
    fn test_add_duplicate_is_case_insensitive() {
        let mut doc = doc_with(&["home"]);
        let before = doc.clone();

        let err = add_item(&mut doc, &item("HOME")).unwrap_err();
        assert!(matches!(err, FolioError::DuplicateId { ref id } if id == "home"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_rejects_id_present_in_only_one_sequence() {
        let mut doc = doc_with(&["home"]);
        doc.pages.clear();

        assert!(add_item(&mut doc, &item("home")).is_err());
        assert!(doc.pages.is_empty());
        assert_eq!(doc.sidebar.len(), 1);
    }

    #[test]
    fn test_add_matches_legacy_mixed_case_ids() {
        let mut doc = SiteConfig {
            pages: vec![Page {
                id: "About".to_string(),
                title: "About".to_string(),
                content: None,
            }],
            sidebar: vec![],
        };
        assert!(add_item(&mut doc, &item("about")).is_err());
    }

    #[test]
    fn test_delete_partial() {
        let mut doc = doc_with(&["home", "blog"]);
        doc.sidebar.retain(|s| s.id != "blog");

        let removed = delete_item(&mut doc, "blog").unwrap();
        assert!(removed.page);
        assert!(!removed.sidebar);
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.sidebar.len(), 1);
    }

    #[test]
    fn test_delete_missing() {
        let mut doc = doc_with(&["home"]);
        let before = doc.clone();

        let err = delete_item(&mut doc, "nope").unwrap_err();
        assert!(matches!(err, FolioError::NotFound { ref id } if id == "nope"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_removes_every_spelling() {
        let mut doc = SiteConfig {
            pages: vec![
                Page {
                    id: "Home".to_string(),
                    title: "Home".to_string(),
                    content: None,
                },
                Page {
                    id: "home".to_string(),
                    title: "Home".to_string(),
                    content: None,
                },
            ],
            sidebar: vec![
                SidebarItem {
                    id: "HOME".to_string(),
                    label: "Home".to_string(),
                    active: None,
                },
                SidebarItem {
                    id: "home".to_string(),
                    label: "Home".to_string(),
                    active: Some(true),
                },
            ],
        };

        let removed = delete_item(&mut doc, "home").unwrap();

        assert!(removed.page && removed.sidebar);
        assert!(doc.pages.is_empty());
        assert!(doc.sidebar.is_empty());
        assert!(matches!(
            delete_item(&mut doc, "home"),
            Err(FolioError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_keeps_omitted_fields() {
        let mut doc = doc_with(&["home"]);
        doc.pages[0].content = Some("Welcome".to_string());

        let patch = ItemPatch {
            title: Some("Start".to_string()),
            ..Default::default()
        };
        let id = update_item(&mut doc, "home", &patch).unwrap();

        assert_eq!(id, "home");
        assert_eq!(doc.pages[0].title, "Start");
        assert_eq!(doc.pages[0].content.as_deref(), Some("Welcome"));
        assert_eq!(doc.sidebar[0].label, "Home");
        assert_eq!(doc.sidebar[0].active, Some(false));
    }

    #[test]
    fn test_update_rename_preserves_position() {
        let mut doc = doc_with(&["home", "blog", "about"]);
        let patch = ItemPatch {
            id: Some("News".to_string()),
            active: Some(true),
            ..Default::default()
        };
        update_item(&mut doc, "blog", &patch).unwrap();

        assert_eq!(doc.pages[1].id, "news");
        assert_eq!(doc.sidebar[1].id, "news");
        assert_eq!(doc.sidebar[1].active, Some(true));
        // Label is not regenerated from the new id
        assert_eq!(doc.sidebar[1].label, "Blog");
    }

    #[test]
    fn test_update_rename_collision() {
        let mut doc = doc_with(&["home", "blog"]);
        let before = doc.clone();
        let patch = ItemPatch {
            id: Some("home".to_string()),
            ..Default::default()
        };

        let err = update_item(&mut doc, "blog", &patch).unwrap_err();
        assert!(matches!(err, FolioError::DuplicateId { ref id } if id == "home"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_same_id_different_case_is_not_a_collision() {
        let mut doc = doc_with(&["home"]);
        let patch = ItemPatch {
            id: Some("HOME".to_string()),
            ..Default::default()
        };
        assert_eq!(update_item(&mut doc, "home", &patch).unwrap(), "home");
    }

    #[test]
    fn test_update_missing() {
        let mut doc = doc_with(&["home"]);
        let err = update_item(&mut doc, "blog", &ItemPatch::default()).unwrap_err();
        assert!(matches!(err, FolioError::NotFound { .. }));
    }

    #[test]
    fn test_update_only_touches_matched_sequence() {
        let mut doc = doc_with(&["home"]);
        doc.sidebar.clear();

        let patch = ItemPatch {
            label: Some("ignored".to_string()),
            title: Some("Landing".to_string()),
            ..Default::default()
        };
        update_item(&mut doc, "home", &patch).unwrap();

        assert!(doc.sidebar.is_empty());
        assert_eq!(doc.pages[0].title, "Landing");
    }
}
