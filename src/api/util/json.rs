use anyhow::Result;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::errors::{AppError, internal_error};

/// Wrap a service result in the API envelope; errors keep their message.
pub fn to_json<T: serde::Serialize>(
    result: Result<T>
) -> Result<Json<ApiResponse<T>>, AppError> {
    result
        .map(|value| Json(ApiResponse::ok(value)))
        .map_err(internal_error)
}
