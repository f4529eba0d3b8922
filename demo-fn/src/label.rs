//! Class index to human-readable label mapping

use serde::Serialize;
use thiserror::Error;

/// Label for class 0
pub const FAKE_NEWS: &str = "Fake News";
/// Label for class 1
pub const REAL_NEWS: &str = "Real News";

/// A class index outside the binary {0, 1} range reached the label mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid class index: {0} (expected 0 or 1)")]
pub struct InvalidClassIndex(pub i64);

/// Map a binary class index to its label
///
/// Fails closed: anything other than 0 or 1 is an error rather than a
/// default label.
pub fn label(class_index: i64) -> Result<&'static str, InvalidClassIndex> {
    match class_index {
        0 => Ok(FAKE_NEWS),
        1 => Ok(REAL_NEWS),
        other => Err(InvalidClassIndex(other)),
    }
}

/// Outcome of one classification request (never persisted)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class_index: i64,
    pub label: &'static str,
    /// Raw linear decision value; positive means class 1
    pub score: f64,
}

impl Prediction {
    pub fn new(class_index: i64, score: f64) -> Result<Self, InvalidClassIndex> {
        Ok(Self {
            class_index,
            label: label(class_index)?,
            score,
        })
    }
}
