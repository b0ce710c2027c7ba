// rest/error.rs: maps store failures and transport problems onto HTTP
// responses with the wire shapes the API guarantees.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;

/// Failures a route handler can surface.
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    /// POST/PUT body was not declared as JSON.
    UnsupportedMediaType,
    /// Body parsed as JSON but did not match the expected shape.
    InvalidBody,
    /// Path did not resolve to a known endpoint (non-integer id segments).
    EndpointNotFound,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Store(StoreError::NotFound { id }) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Task not found", "task_id": id })),
            )
                .into_response(),
            Self::Store(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
            Self::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(json!({ "error": "Content-Type must be application/json" })),
            )
                .into_response(),
            Self::InvalidBody => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid request body" })),
            )
                .into_response(),
            Self::EndpointNotFound => endpoint_not_found(),
        }
    }
}

/// Shared 404 body for unmatched routes and unroutable id segments.
pub fn endpoint_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "message": "The requested endpoint does not exist",
        })),
    )
        .into_response()
}
