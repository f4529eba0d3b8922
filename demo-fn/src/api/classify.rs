//! Classification API handlers
//!
//! POST /api/classify, POST /api/normalize

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::normalize::normalize;
use crate::AppState;

/// Request body shared by both endpoints
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// POST /api/classify response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub class_index: i64,
    pub label: String,
    pub score: f64,
    pub normalized: String,
}

/// POST /api/normalize response
#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub normalized: String,
}

/// Build classification routes
pub fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/api/classify", post(classify))
        .route("/api/normalize", post(normalize_text))
}

/// POST /api/classify
///
/// Label an article. Empty text is rejected; a service whose model did not
/// load answers 503 with a generic message.
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> ApiResult<Json<ClassifyResponse>> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("News text is empty".to_string()));
    }

    let classifier = state.classifier.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Classification model is not available".to_string())
    })?;

    let result = classifier.classify(&request.text)?;

    tracing::info!(
        label = result.prediction.label,
        score = result.prediction.score,
        input_chars = request.text.chars().count(),
        "Article classified"
    );

    Ok(Json(ClassifyResponse {
        class_index: result.prediction.class_index,
        label: result.prediction.label.to_string(),
        score: result.prediction.score,
        normalized: result.normalized,
    }))
}

/// POST /api/normalize
///
/// Show the cleaned text the model would see. Works without a model.
pub async fn normalize_text(Json(request): Json<TextRequest>) -> Json<NormalizeResponse> {
    Json(NormalizeResponse {
        normalized: normalize(&request.text),
    })
}
