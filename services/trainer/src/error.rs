//! Custom error types for the trainer service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the trainer service
#[derive(Error, Debug)]
pub enum AppError {
    /// Request carries no session cookie
    #[error("No active session")]
    NoSession,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Template missing from the loaded store
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NoSession => (StatusCode::UNAUTHORIZED, "No active session".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UnknownTemplate(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;
