//! Generation request and prompt building
//!
//! Structured form inputs (genre, mood, tempo, duration) become one
//! natural-language prompt for the generative model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shortest clip the form allows, in seconds
pub const MIN_DURATION_SECS: u32 = 5;
/// Longest clip the form allows, in seconds
pub const MAX_DURATION_SECS: u32 = 30;
pub const DEFAULT_DURATION_SECS: u32 = 10;
pub const DEFAULT_GENRE: &str = "lo-fi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    #[default]
    Chill,
    Energetic,
    Romantic,
    Epic,
}

impl Mood {
    /// All moods in form order
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Chill,
        Mood::Energetic,
        Mood::Romantic,
        Mood::Epic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Chill => "chill",
            Mood::Energetic => "energetic",
            Mood::Romantic => "romantic",
            Mood::Epic => "epic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tempo {
    Slow,
    #[default]
    Mid,
    Fast,
}

impl Tempo {
    /// All tempos in form order
    pub const ALL: [Tempo; 3] = [Tempo::Slow, Tempo::Mid, Tempo::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tempo::Slow => "slow",
            Tempo::Mid => "mid",
            Tempo::Fast => "fast",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown mood or tempo name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseChoiceError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Mood {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| ParseChoiceError {
                kind: "mood",
                value: s.to_string(),
            })
    }
}

impl FromStr for Tempo {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tempo::ALL
            .into_iter()
            .find(|tempo| tempo.as_str() == s)
            .ok_or_else(|| ParseChoiceError {
                kind: "tempo",
                value: s.to_string(),
            })
    }
}

/// Build the model prompt
///
/// `duration` is not part of the text; it is passed to the model as a
/// generation parameter instead.
pub fn build(genre: &str, mood: Mood, tempo: Tempo, _duration: u32) -> String {
    format!("A {} tempo {} track that feels {}", tempo, genre, mood)
}

/// One generation request, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free text, not validated
    #[serde(default = "default_genre")]
    pub genre: String,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub tempo: Tempo,
    /// Seconds; the HTTP layer enforces [`MIN_DURATION_SECS`, `MAX_DURATION_SECS`]
    #[serde(default = "default_duration")]
    pub duration: u32,
}

fn default_genre() -> String {
    DEFAULT_GENRE.to_string()
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_SECS
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            genre: default_genre(),
            mood: Mood::default(),
            tempo: Tempo::default(),
            duration: DEFAULT_DURATION_SECS,
        }
    }
}

impl GenerationRequest {
    pub fn new(genre: impl Into<String>, mood: Mood, tempo: Tempo, duration: u32) -> Self {
        Self {
            genre: genre.into(),
            mood,
            tempo,
            duration,
        }
    }

    pub fn prompt(&self) -> String {
        build(&self.genre, self.mood, self.tempo, self.duration)
    }

    pub fn duration_in_range(&self) -> bool {
        (MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&self.duration)
    }
}
