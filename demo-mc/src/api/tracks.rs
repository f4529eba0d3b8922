//! Track download handlers
//!
//! GET /api/sessions/:id/last, GET /api/sessions/:id/tracks/:index

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use uuid::Uuid;

use super::sessions::find_session;
use crate::error::{ApiError, ApiResult};
use crate::history::TrackRecord;
use crate::AppState;

pub fn track_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sessions/:id/last", get(download_last))
        .route("/api/sessions/:id/tracks/:index", get(download_track))
}

/// GET /api/sessions/:id/last
pub async fn download_last(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let record = {
        let session = find_session(&state, id).await?;
        let session = session.lock().await;
        let last = session.history.last().cloned();
        last.ok_or_else(|| ApiError::NotFound("No track generated yet".to_string()))?
    };
    wav_attachment(&record).await
}

/// GET /api/sessions/:id/tracks/:index
pub async fn download_track(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> ApiResult<Response> {
    let record = {
        let session = find_session(&state, id).await?;
        let session = session.lock().await;
        let track = session.history.get(index).cloned();
        track.ok_or_else(|| ApiError::NotFound(format!("Track {} not found", index)))?
    };
    wav_attachment(&record).await
}

async fn wav_attachment(record: &TrackRecord) -> ApiResult<Response> {
    let bytes = match tokio::fs::read(&record.file_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound(format!(
                "Track file {} no longer exists",
                record.file_name()
            )));
        }
        Err(e) => {
            return Err(ApiError::Internal(format!(
                "Failed to read {}: {}",
                record.file_path.display(),
                e
            )));
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", record.file_name()),
            ),
        ],
        bytes,
    )
        .into_response())
}
