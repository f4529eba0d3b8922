//! Composer session API handlers
//!
//! POST /api/sessions, DELETE /api/sessions/:id,
//! POST /api/sessions/:id/generate, POST /api/sessions/:id/regenerate,
//! GET /api/sessions/:id/history

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::history::TrackRecord;
use crate::prompt::{GenerationRequest, MAX_DURATION_SECS, MIN_DURATION_SECS};
use crate::session::ComposerSession;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

/// One track as shown to the browser
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    /// Insertion index in the session history
    pub index: usize,
    pub file_name: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
    pub download_url: String,
}

impl TrackResponse {
    pub fn new(session_id: Uuid, index: usize, record: &TrackRecord) -> Self {
        Self {
            index,
            file_name: record.file_name(),
            prompt: record.prompt.clone(),
            created_at: record.created_at,
            download_url: format!("/api/sessions/{}/tracks/{}", session_id, index),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Most recent first
    pub tracks: Vec<TrackResponse>,
    /// Tracks generated in this session, including ones not listed
    pub total: usize,
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", delete(end_session))
        .route("/api/sessions/:id/generate", post(generate))
        .route("/api/sessions/:id/regenerate", post(regenerate))
        .route("/api/sessions/:id/history", get(get_history))
}

pub(crate) async fn find_session(
    state: &AppState,
    id: Uuid,
) -> ApiResult<Arc<Mutex<ComposerSession>>> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Session {} not found", id)))
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionCreatedResponse { session_id }))
}

/// DELETE /api/sessions/:id
///
/// Drops the session's history. Generated files stay on disk.
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Session {} not found", id)))
    }
}

/// POST /api/sessions/:id/generate
///
/// Holds the session lock for the whole generate → save → append sequence,
/// so a second request for the same session waits for the first.
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerationRequest>,
) -> ApiResult<(StatusCode, Json<TrackResponse>)> {
    if !request.duration_in_range() {
        return Err(ApiError::BadRequest(format!(
            "Duration must be between {} and {} seconds, got {}",
            MIN_DURATION_SECS, MAX_DURATION_SECS, request.duration
        )));
    }

    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;

    let record = state.composer.compose(&mut session, request).await?;
    let index = session.history.len() - 1;

    Ok((StatusCode::CREATED, Json(TrackResponse::new(id, index, &record))))
}

/// POST /api/sessions/:id/regenerate
///
/// Runs the session's last successful request again.
pub async fn regenerate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<TrackResponse>)> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;

    let record = state
        .composer
        .regenerate(&mut session)
        .await
        .ok_or_else(|| ApiError::Conflict("Nothing has been generated yet".to_string()))??;
    let index = session.history.len() - 1;

    Ok((StatusCode::CREATED, Json(TrackResponse::new(id, index, &record))))
}

/// GET /api/sessions/:id/history?limit=n
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let limit = query.limit.unwrap_or(state.history_limit);

    let session = find_session(&state, id).await?;
    let session = session.lock().await;

    let total = session.history.len();
    let tracks = session
        .history
        .recent(limit)
        .into_iter()
        .enumerate()
        .map(|(offset, record)| TrackResponse::new(id, total - 1 - offset, record))
        .collect();

    Ok(Json(HistoryResponse { tracks, total }))
}
