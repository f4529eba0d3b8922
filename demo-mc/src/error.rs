//! Error types for demo-mc HTTP handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::composer::ComposeError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Unknown session or track (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request not valid in the session's current state (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Audio model backend unreachable, failed or answered garbage (502)
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ComposeError> for ApiError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::Generator(e) => ApiError::Generation(e.to_string()),
            ComposeError::EmptyOutput => {
                ApiError::Generation("Audio model returned no waveform".to_string())
            }
            ComposeError::Persistence(e) => ApiError::Internal(e.to_string()),
            ComposeError::Task(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Generation(msg) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", msg),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, "{}", message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
