use axum::http::StatusCode;

/// GET /health - liveness check, does not touch the store.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
