//! Generated track persistence
//!
//! Tracks are written as uncompressed 32-bit float WAV at 32000 Hz under
//! the output directory, which is created on first use. Each write goes to
//! its own uniquely named `.part` sibling and is renamed into place once
//! finalized, so a failed or concurrent write never leaves a truncated or
//! interleaved `.wav` behind.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use crate::generator::Waveform;
use crate::prompt::GenerationRequest;

/// Output sample rate of the generative model
pub const SAMPLE_RATE: u32 = 32_000;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to move {path} into place: {source}")]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write an empty waveform")]
    EmptyWaveform,
}

/// File name for a track: `{genre}{mood}{tempo}_{YYYYMMDDHHMMSS}.wav`
///
/// Genre is free text, so anything that is not alphanumeric, `-` or `_`
/// is replaced with `_` to keep the name inside the output directory.
/// Two tracks with the same settings in the same second share a name; the
/// later one overwrites the earlier file.
pub fn track_file_name<Tz>(request: &GenerationRequest, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let genre: String = request
        .genre
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "{}{}{}_{}.wav",
        genre,
        request.mood,
        request.tempo,
        now.format(TIMESTAMP_FORMAT)
    )
}

#[derive(Debug, Clone)]
pub struct WavPersistence {
    output_dir: PathBuf,
}

impl WavPersistence {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn track_path<Tz>(&self, request: &GenerationRequest, now: &DateTime<Tz>) -> PathBuf
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.output_dir.join(track_file_name(request, now))
    }

    /// Write `waveform` to `path` as a WAV file
    pub fn save(
        &self,
        waveform: &Waveform,
        sample_rate: u32,
        path: &Path,
    ) -> Result<(), PersistenceError> {
        if waveform.channels == 0 || waveform.samples.is_empty() {
            return Err(PersistenceError::EmptyWaveform);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let spec = hound::WavSpec {
            channels: waveform.channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let part_path = part_path(path);
        if let Err(source) = write_wav(&part_path, spec, &waveform.samples) {
            let _ = fs::remove_file(&part_path);
            return Err(PersistenceError::Write {
                path: path.to_path_buf(),
                source,
            });
        }

        fs::rename(&part_path, path).map_err(|source| {
            let _ = fs::remove_file(&part_path);
            PersistenceError::Rename {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::debug!(
            path = %path.display(),
            channels = waveform.channels,
            frames = waveform.frames(),
            "Track written"
        );
        Ok(())
    }
}

/// Hidden per-write temp file next to `path`
fn part_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.part", file_name, Uuid::new_v4().simple()))
}

fn write_wav(path: &Path, spec: hound::WavSpec, samples: &[f32]) -> Result<(), hound::Error> {
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Mood, Tempo};
    use chrono::{Local, Utc};

    #[test]
    fn test_track_file_name() {
        let request = GenerationRequest::new("jazz", Mood::Chill, Tempo::Slow, 10);
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            track_file_name(&request, &now),
            "jazzchillslow_20240309140507.wav"
        );
    }

    #[test]
    fn test_track_file_name_sanitizes_genre() {
        let request = GenerationRequest::new("../hip hop", Mood::Epic, Tempo::Fast, 10);
        let now = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let name = track_file_name(&request, &now);
        assert_eq!(name, "___hip_hopepicfast_20240101000000.wav");
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_part_paths_are_unique_siblings() {
        let path = Path::new("outputs/lo-fichillmid_20240101000000.wav");
        let first = part_path(path);
        let second = part_path(path);
        assert_ne!(first, second);
        assert_eq!(first.parent(), path.parent());
        let name = first.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".lo-fichillmid_20240101000000.wav."));
        assert!(name.ends_with(".part"));
    }

    #[test]
    fn test_lo_fi_keeps_hyphen() {
        let request = GenerationRequest::default();
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            track_file_name(&request, &now),
            "lo-fichillmid_20251231235959.wav"
        );
    }
}
