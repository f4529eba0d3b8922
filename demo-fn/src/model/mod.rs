//! Pre-trained model adapters
//!
//! The vectorizer and classifier are opaque, pre-trained artifacts. They are
//! exported to JSON once (outside this service) and loaded at startup. The
//! traits are the seams the classification pipeline depends on; tests plug
//! in small hand-built models.

pub mod linear;
pub mod tfidf;

pub use linear::{LinearArtifact, LinearClassifier};
pub use tfidf::{Norm, TfidfArtifact, TfidfVectorizer};

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Model artifact loading errors
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Artifact file missing or unreadable
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact file is not valid JSON for the expected shape
    #[error("Failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact parsed but its contents are inconsistent
    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// One sparse feature row: `(column, value)` pairs sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub dim: usize,
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Dot product with a dense weight vector; columns past its end count as 0
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(column, value)| weights.get(column).map(|w| w * value))
            .sum()
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }
}

/// Feature matrix: one sparse row per input document
pub type FeatureMatrix = Vec<SparseVector>;

/// Turns documents into fixed-width numeric feature rows
pub trait FeatureVectorizer: Send + Sync {
    /// Width of every produced row
    fn n_features(&self) -> usize;

    /// Vectorize each text into one row
    fn transform(&self, texts: &[&str]) -> FeatureMatrix;
}

/// Scores feature rows and assigns class indices
pub trait Classifier: Send + Sync {
    /// Expected row width
    fn n_features(&self) -> usize;

    /// Raw decision value per row
    fn decision_function(&self, features: &FeatureMatrix) -> Vec<f64>;

    /// Class index per row
    fn predict(&self, features: &FeatureMatrix) -> Vec<i64>;
}

/// Read and deserialize a JSON artifact
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
