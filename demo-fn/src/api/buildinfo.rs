//! Build and model identification for the detector page footer

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::MODULE_NAME;
use crate::AppState;

/// GET /api/buildinfo response
#[derive(Debug, Serialize)]
pub struct DetectorBuild {
    pub module: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    /// Vocabulary size of the loaded vectorizer; absent when no model is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_features: Option<usize>,
}

impl DetectorBuild {
    fn for_state(state: &AppState) -> Self {
        Self {
            module: MODULE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            build_profile: env!("BUILD_PROFILE"),
            model_features: state.classifier.as_ref().map(|c| c.n_features()),
        }
    }
}

/// GET /api/buildinfo
pub async fn get_build_info(State(state): State<AppState>) -> Json<DetectorBuild> {
    Json(DetectorBuild::for_state(&state))
}
