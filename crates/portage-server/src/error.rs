use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use portage_storage::error::StorageError;

/// Unified API error type for the route handlers. Storage details are logged,
/// never returned to the client.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    ReadFailed(StorageError),
    SaveFailed(StorageError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ReadFailed(e) => {
                tracing::error!(error = %e, "failed to read collection");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to read data".to_string(),
                )
            }
            ApiError::SaveFailed(e) => {
                tracing::error!(error = %e, "failed to save collection");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save data".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
