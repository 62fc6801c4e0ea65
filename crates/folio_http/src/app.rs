use axum::{
    http::{header, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    error::ApiError,
    handlers::{
        health::health,
        items::{add_item, delete_item, get_config, update_item},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/config", get(get_config))
        .route("/addItem", post(add_item))
        .route("/deleteItem", post(delete_item))
        .route("/updateItem", post(update_item))
        .layer(cors);

    let timeout = state.request_timeout;
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(middleware::map_response(timeout_body))
        .with_state(state)
}

/// Give the empty 408 from the timeout layer the usual failure body
async fn timeout_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!("Request timed out");
    ApiError {
        status: StatusCode::REQUEST_TIMEOUT,
        message: "Request timed out".to_string(),
    }
    .into_response()
}
