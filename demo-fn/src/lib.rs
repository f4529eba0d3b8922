//! demo-fn library - Fake News Detector
//!
//! Normalizes pasted article text, scores it with a pre-trained TF-IDF +
//! linear model and labels it "Fake News" or "Real News".

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod label;
pub mod model;
pub mod normalize;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::classifier::NewsClassifier;
use crate::model::ArtifactError;

/// Application state shared across HTTP handlers
///
/// The classifier is loaded once at startup and never mutated, so handlers
/// share it through a plain `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    /// Loaded model, or `None` if the artifacts failed to load
    pub classifier: Option<Arc<NewsClassifier>>,
    /// Why the model is unavailable (reported by /health only)
    pub model_error: Option<Arc<str>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(classifier: NewsClassifier) -> Self {
        Self {
            classifier: Some(Arc::new(classifier)),
            model_error: None,
            startup_time: Utc::now(),
        }
    }

    /// State for a service whose model artifacts could not be loaded
    pub fn without_model(error: &ArtifactError) -> Self {
        Self {
            classifier: None,
            model_error: Some(Arc::from(error.to_string())),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::classify_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
