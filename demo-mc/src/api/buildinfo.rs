//! Build identification plus the audio backend this build talks to

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::MODULE_NAME;
use crate::persistence::SAMPLE_RATE;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ComposerBuild {
    pub module: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    pub generator: String,
    /// Sample rate of every WAV this service writes
    pub sample_rate: u32,
}

/// GET /api/buildinfo
pub async fn get_build_info(State(state): State<AppState>) -> Json<ComposerBuild> {
    Json(ComposerBuild {
        module: MODULE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        build_profile: env!("BUILD_PROFILE"),
        generator: state.composer.generator_name().to_string(),
        sample_rate: SAMPLE_RATE,
    })
}
