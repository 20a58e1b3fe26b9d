use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Failures raised inside the dispatcher cache and its adapters.
///
/// None of these are fatal: handlers log them and drop the notification.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to convert Queue <{name}>: {reason}")]
    QueueConversion { name: String, reason: String },

    #[error("Invalid quantity {value:?} for resource {resource}")]
    InvalidQuantity { resource: String, value: String },

    #[error("Failed to classify resource {api_version}/{kind}: {reason}")]
    WorkloadClassification {
        api_version: String,
        kind: String,
        reason: String,
    },

    #[error("{kind} namespace <{namespace}> is not in the cache (deleting <{namespace}/{name}>)")]
    NamespaceNotCached {
        kind: &'static str,
        namespace: String,
        name: String,
    },

    #[error("Cache inconsistency: {0}")]
    Inconsistent(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors surfaced by the read-only HTTP API.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
