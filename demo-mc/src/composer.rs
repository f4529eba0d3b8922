//! Music composer pipeline
//!
//! `request → prompt → generator.generate → persistence.save → history.append`
//!
//! The history entry is only appended once the WAV file is on disk, so a
//! failure anywhere leaves the session exactly as it was.

use chrono::{Local, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::generator::{AudioGenerator, GenerationParams, GeneratorError};
use crate::history::TrackRecord;
use crate::persistence::{PersistenceError, WavPersistence, SAMPLE_RATE};
use crate::prompt::GenerationRequest;
use crate::session::ComposerSession;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Audio model returned no waveform")]
    EmptyOutput,

    #[error("Track writer task failed: {0}")]
    Task(String),
}

/// Generates and stores tracks; shared by all sessions
#[derive(Clone)]
pub struct Composer {
    generator: Arc<dyn AudioGenerator>,
    persistence: WavPersistence,
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("generator", &self.generator.name())
            .field("output_dir", &self.persistence.output_dir())
            .finish()
    }
}

impl Composer {
    pub fn new(generator: Arc<dyn AudioGenerator>, persistence: WavPersistence) -> Self {
        Self {
            generator,
            persistence,
        }
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    pub fn persistence(&self) -> &WavPersistence {
        &self.persistence
    }

    /// Generate one track for `request` and record it in `session`
    pub async fn compose(
        &self,
        session: &mut ComposerSession,
        request: GenerationRequest,
    ) -> Result<TrackRecord, ComposeError> {
        let prompt = request.prompt();
        let params = GenerationParams::with_duration(request.duration);

        tracing::info!(
            prompt = %prompt,
            duration_secs = request.duration,
            generator = self.generator.name(),
            "Generating track"
        );

        let waveform = self
            .generator
            .generate(&params, std::slice::from_ref(&prompt))
            .await?
            .into_iter()
            .next()
            .ok_or(ComposeError::EmptyOutput)?;

        let audio_secs = waveform.duration_secs(SAMPLE_RATE);
        let path = self.persistence.track_path(&request, &Local::now());

        let persistence = self.persistence.clone();
        let write_path = path.clone();
        tokio::task::spawn_blocking(move || persistence.save(&waveform, SAMPLE_RATE, &write_path))
            .await
            .map_err(|e| ComposeError::Task(e.to_string()))??;

        let record = TrackRecord::new(path, prompt, Utc::now());
        session.history.append(record.clone());
        session.last_request = Some(request);

        tracing::info!(
            file = %record.file_path.display(),
            audio_secs,
            tracks = session.history.len(),
            "Track saved"
        );
        Ok(record)
    }

    /// Repeat the session's last successful request
    ///
    /// Returns `None` if the session has not generated anything yet.
    pub async fn regenerate(
        &self,
        session: &mut ComposerSession,
    ) -> Option<Result<TrackRecord, ComposeError>> {
        let request = session.last_request.clone()?;
        Some(self.compose(session, request).await)
    }
}
