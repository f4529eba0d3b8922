//! Error types for demo-fn HTTP handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::classifier::ClassifyError;
use crate::label::InvalidClassIndex;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Model artifacts failed to load at startup (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Classifier produced a class index outside {0, 1} (500)
    #[error(transparent)]
    InvalidClassIndex(#[from] InvalidClassIndex),

    /// Classifier produced no prediction for the article (500)
    #[error("Classifier returned no prediction")]
    MissingPrediction,
}

impl From<ClassifyError> for ApiError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::InvalidClassIndex(e) => ApiError::InvalidClassIndex(e),
            ClassifyError::MissingPrediction => ApiError::MissingPrediction,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "MODEL_UNAVAILABLE", msg)
            }
            ApiError::InvalidClassIndex(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_CLASS_INDEX",
                err.to_string(),
            ),
            ApiError::MissingPrediction => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MISSING_PREDICTION",
                "Classifier returned no prediction".to_string(),
            ),
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
