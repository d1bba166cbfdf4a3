//! API error types with IntoResponse
//!
//! Not-found, validation and infrastructure failures are separate variants
//! and map to 404, 400 and 500 respectively.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404, empty body)
    NotFound { resource: &'static str, id: i32 },

    /// Database error (500, message passed through, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation_error",
                    "message": e.to_string()
                })),
            )
                .into_response(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id, "not found");
                StatusCode::NOT_FOUND.into_response()
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": e.to_string()
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
