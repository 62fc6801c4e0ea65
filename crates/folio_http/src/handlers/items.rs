//! Document handlers.
//!
//! Each handler is a thin adapter: decode the body, call the matching
//! [`folio_core::ConfigService`] operation, render the outcome.

use axum::{extract::State, Json};
use folio_common::{DeleteItem, NewItem, SiteConfig, UpdateItem};

use super::ApiResponse;
use crate::{error::ApiError, extract::ApiJson, state::AppState};

/// GET /api/config - the stored document, or the empty default.
#[axum::debug_handler]
pub async fn get_config(State(state): State<AppState>) -> Result<Json<SiteConfig>, ApiError> {
    let config = state
        .service
        .get_config()
        .await
        .map_err(ApiError::failed("get config"))?;
    Ok(Json(config))
}

/// POST /api/addItem
#[axum::debug_handler]
pub async fn add_item(
    State(state): State<AppState>,
    ApiJson(item): ApiJson<NewItem>,
) -> Result<Json<ApiResponse>, ApiError> {
    let outcome = state
        .service
        .add_item(item)
        .await
        .map_err(ApiError::failed("add item"))?;
    Ok(Json(outcome.into()))
}

/// POST /api/deleteItem
#[axum::debug_handler]
pub async fn delete_item(
    State(state): State<AppState>,
    ApiJson(args): ApiJson<DeleteItem>,
) -> Result<Json<ApiResponse>, ApiError> {
    let outcome = state
        .service
        .delete_item(&args.id)
        .await
        .map_err(ApiError::failed("delete item"))?;
    Ok(Json(outcome.into()))
}

/// POST /api/updateItem
#[axum::debug_handler]
pub async fn update_item(
    State(state): State<AppState>,
    ApiJson(args): ApiJson<UpdateItem>,
) -> Result<Json<ApiResponse>, ApiError> {
    let outcome = state
        .service
        .update_item(&args.old_id, args.new_item)
        .await
        .map_err(ApiError::failed("update item"))?;
    Ok(Json(outcome.into()))
}
