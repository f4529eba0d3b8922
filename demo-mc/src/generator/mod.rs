//! Generative audio model seam
//!
//! The model itself is external. The service holds exactly one
//! [`AudioGenerator`] for its whole lifetime behind an `Arc`; it is never
//! mutated after startup, so per-call settings travel in
//! [`GenerationParams`] instead of being set on the shared handle.

pub mod http;

pub use http::HttpAudioGenerator;

use async_trait::async_trait;
use thiserror::Error;

/// Per-call generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub duration_secs: u32,
}

impl GenerationParams {
    pub fn with_duration(duration_secs: u32) -> Self {
        Self { duration_secs }
    }
}

/// Generated audio: interleaved f32 samples
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl Waveform {
    pub fn mono(samples: Vec<f32>) -> Self {
        Self {
            channels: 1,
            samples,
        }
    }

    /// Samples per channel
    pub fn frames(&self) -> usize {
        match self.channels {
            0 => 0,
            channels => self.samples.len() / channels as usize,
        }
    }

    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / sample_rate as f64
    }
}

/// Generation failures
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Backend unreachable, timed out or not loaded
    #[error("Audio model unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with an error (e.g. out of memory)
    #[error("Audio model error {status}: {message}")]
    Backend { status: u16, message: String },

    /// Backend answered with something we cannot use
    #[error("Invalid audio model response: {0}")]
    Protocol(String),
}

/// Text-to-audio model
#[async_trait]
pub trait AudioGenerator: Send + Sync {
    /// Short identifier for logs and /health
    fn name(&self) -> &str;

    /// One waveform per prompt, in prompt order
    async fn generate(
        &self,
        params: &GenerationParams,
        prompts: &[String],
    ) -> Result<Vec<Waveform>, GeneratorError>;
}
