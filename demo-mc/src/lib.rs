//! demo-mc library - AI Music Composer
//!
//! Turns genre, mood, tempo and duration into a text prompt, has a
//! generative audio model render it, saves the result as a WAV file and
//! keeps a per-session history of generated tracks.

pub mod api;
pub mod composer;
pub mod config;
pub mod error;
pub mod generator;
pub mod history;
pub mod persistence;
pub mod prompt;
pub mod session;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::composer::Composer;
use crate::session::SessionRegistry;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Generator and writer, shared read-only by every session
    pub composer: Arc<Composer>,
    pub sessions: SessionRegistry,
    /// Default number of tracks returned by the history endpoint
    pub history_limit: usize,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(composer: Composer, history_limit: usize) -> Self {
        Self {
            composer: Arc::new(composer),
            sessions: SessionRegistry::new(),
            history_limit,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::options_routes())
        .merge(api::session_routes())
        .merge(api::track_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
