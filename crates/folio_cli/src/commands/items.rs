//! One-shot document edits against the configured store.

use anyhow::Result;
use folio_common::{ItemPatch, NewItem};

use super::open_service;

pub async fn cmd_show() -> Result<()> {
    let (_, service) = open_service(false)?;
    let doc = service.get_config().await?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

pub async fn cmd_add(
    id: String,
    title: Option<String>,
    label: Option<String>,
    content: Option<String>,
    active: bool,
) -> Result<()> {
    let (_, service) = open_service(false)?;
    let item = NewItem {
        id,
        title,
        label,
        content,
        active: active.then_some(true),
    };
    let outcome = service.add_item(item).await?;
    println!("{}", outcome.message);
    Ok(())
}

pub async fn cmd_delete(id: String) -> Result<()> {
    let (_, service) = open_service(false)?;
    let outcome = service.delete_item(&id).await?;
    println!("{}", outcome.message);
    Ok(())
}

pub async fn cmd_update(
    old_id: String,
    id: Option<String>,
    title: Option<String>,
    label: Option<String>,
    content: Option<String>,
    active: Option<bool>,
) -> Result<()> {
    let (_, service) = open_service(false)?;
    let patch = ItemPatch {
        id,
        title,
        label,
        content,
        active,
    };
    let outcome = service.update_item(&old_id, patch).await?;
    println!("{}", outcome.message);
    Ok(())
}
