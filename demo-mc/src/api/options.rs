//! Form options and prompt preview
//!
//! GET /api/options, POST /api/prompt

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::prompt::{
    GenerationRequest, Mood, Tempo, DEFAULT_DURATION_SECS, MAX_DURATION_SECS, MIN_DURATION_SECS,
};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DurationBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

/// GET /api/options response
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub moods: Vec<&'static str>,
    pub tempos: Vec<&'static str>,
    pub defaults: GenerationRequest,
    pub duration: DurationBounds,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

pub fn options_routes() -> Router<AppState> {
    Router::new()
        .route("/api/options", get(get_options))
        .route("/api/prompt", post(preview_prompt))
}

/// GET /api/options
///
/// Choices and defaults for the composer form.
pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        moods: Mood::ALL.iter().map(Mood::as_str).collect(),
        tempos: Tempo::ALL.iter().map(Tempo::as_str).collect(),
        defaults: GenerationRequest::default(),
        duration: DurationBounds {
            min: MIN_DURATION_SECS,
            max: MAX_DURATION_SECS,
            default: DEFAULT_DURATION_SECS,
        },
    })
}

/// POST /api/prompt
///
/// Prompt text the model would receive. Duration is not checked here.
pub async fn preview_prompt(Json(request): Json<GenerationRequest>) -> Json<PromptResponse> {
    Json(PromptResponse {
        prompt: request.prompt(),
    })
}
