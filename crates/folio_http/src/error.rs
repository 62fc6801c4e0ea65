use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_common::FolioError;

use crate::handlers::ApiResponse;

/// A failed API call, rendered as `{ success: false, message }`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Adapter for `map_err` that prefixes the message with the operation
    ///
    /// ```ignore
    /// service.delete_item(&id).await.map_err(ApiError::failed("delete item"))?;
    /// ```
    pub fn failed(operation: &'static str) -> impl FnOnce(FolioError) -> Self {
        move |err| {
            let status = status_for(&err);
            if status.is_server_error() {
                tracing::error!(operation, error = %err, "Request failed");
            } else {
                tracing::debug!(operation, error = %err, "Request rejected");
            }
            Self {
                status,
                message: format!("Failed to {}: {}", operation, err),
            }
        }
    }
}

/// HTTP status for a document error
pub fn status_for(err: &FolioError) -> StatusCode {
    match err {
        FolioError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        FolioError::DuplicateId { .. } => StatusCode::CONFLICT,
        FolioError::NotFound { .. } => StatusCode::NOT_FOUND,
        FolioError::VersionConflict | FolioError::ConcurrentModification { .. } => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::failure(self.message))).into_response()
    }
}
