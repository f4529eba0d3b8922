//! HTTP client for a remote text-to-music inference backend
//!
//! Protocol:
//! - `POST {base_url}/generate` with `{"prompts": [...], "duration": secs}`
//! - `200` → `{"sample_rate": 32000, "waveforms": [{"channels": 1, "samples": [...]}]}`
//! - non-2xx → error, body text is reported as the message
//!
//! The model is loaded by the backend once; this client only holds a
//! connection pool and is shared by all sessions.

use super::{AudioGenerator, GenerationParams, GeneratorError, Waveform};
use crate::persistence::SAMPLE_RATE;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const USER_AGENT: &str = concat!("demo-mc/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompts: &'a [String],
    duration: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    sample_rate: u32,
    waveforms: Vec<WaveformPayload>,
}

#[derive(Debug, Deserialize)]
struct WaveformPayload {
    channels: u16,
    samples: Vec<f32>,
}

/// Remote generative audio model
pub struct HttpAudioGenerator {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpAudioGenerator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GeneratorError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| GeneratorError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AudioGenerator for HttpAudioGenerator {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(
        &self,
        params: &GenerationParams,
        prompts: &[String],
    ) -> Result<Vec<Waveform>, GeneratorError> {
        let url = format!("{}/generate", self.base_url);

        tracing::debug!(
            url = %url,
            prompts = prompts.len(),
            duration_secs = params.duration_secs,
            "Requesting audio generation"
        );

        let response = self
            .http_client
            .post(&url)
            .json(&GenerateRequest {
                prompts,
                duration: params.duration_secs,
            })
            .send()
            .await
            .map_err(|e| GeneratorError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Protocol(e.to_string()))?;

        into_waveforms(body, prompts.len())
    }
}

fn into_waveforms(
    body: GenerateResponse,
    expected: usize,
) -> Result<Vec<Waveform>, GeneratorError> {
    if body.sample_rate != SAMPLE_RATE {
        return Err(GeneratorError::Protocol(format!(
            "Expected {} Hz audio, got {} Hz",
            SAMPLE_RATE, body.sample_rate
        )));
    }
    if body.waveforms.len() != expected {
        return Err(GeneratorError::Protocol(format!(
            "Expected {} waveforms, got {}",
            expected,
            body.waveforms.len()
        )));
    }

    body.waveforms
        .into_iter()
        .map(|payload| {
            if payload.channels == 0 || payload.samples.is_empty() {
                return Err(GeneratorError::Protocol("Empty waveform".to_string()));
            }
            if payload.samples.len() % payload.channels as usize != 0 {
                return Err(GeneratorError::Protocol(format!(
                    "{} samples do not divide into {} channels",
                    payload.samples.len(),
                    payload.channels
                )));
            }
            Ok(Waveform {
                channels: payload.channels,
                samples: payload.samples,
            })
        })
        .collect()
}
