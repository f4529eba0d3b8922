//! Fake news classification pipeline
//!
//! `normalize → vectorizer.transform → classifier.predict → label`
//!
//! Built once at startup and shared read-only across all request handlers.

use crate::label::{InvalidClassIndex, Prediction};
use crate::model::{ArtifactError, Classifier, FeatureVectorizer, LinearClassifier, TfidfVectorizer};
use crate::normalize::normalize;
use std::path::Path;
use thiserror::Error;

/// The model did not produce a usable prediction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    InvalidClassIndex(#[from] InvalidClassIndex),

    #[error("Classifier returned no prediction")]
    MissingPrediction,
}

/// Result of classifying one article
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Text exactly as it was fed to the vectorizer
    pub normalized: String,
    pub prediction: Prediction,
}

pub struct NewsClassifier {
    vectorizer: Box<dyn FeatureVectorizer>,
    model: Box<dyn Classifier>,
}

impl std::fmt::Debug for NewsClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClassifier")
            .field("n_features", &self.vectorizer.n_features())
            .finish()
    }
}

impl NewsClassifier {
    /// Pair a vectorizer with a classifier of the same feature width
    pub fn new(
        vectorizer: Box<dyn FeatureVectorizer>,
        model: Box<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        if vectorizer.n_features() != model.n_features() {
            return Err(ArtifactError::Invalid(format!(
                "Vectorizer produces {} features but classifier expects {}",
                vectorizer.n_features(),
                model.n_features()
            )));
        }
        Ok(Self { vectorizer, model })
    }

    /// Load both JSON artifacts from disk
    pub fn load(vectorizer_path: &Path, model_path: &Path) -> Result<Self, ArtifactError> {
        let vectorizer = TfidfVectorizer::load(vectorizer_path)?;
        let model = LinearClassifier::load(model_path)?;
        Self::new(Box::new(vectorizer), Box::new(model))
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Classify one article
    pub fn classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        let normalized = normalize(text);
        let features = self.vectorizer.transform(&[normalized.as_str()]);

        let class_index = self
            .model
            .predict(&features)
            .first()
            .copied()
            .ok_or(ClassifyError::MissingPrediction)?;
        let score = self
            .model
            .decision_function(&features)
            .first()
            .copied()
            .ok_or(ClassifyError::MissingPrediction)?;

        tracing::debug!(
            class_index,
            score,
            nnz = features.first().map(|row| row.nnz()).unwrap_or_default(),
            "Article scored"
        );

        Ok(Classification {
            normalized,
            prediction: Prediction::new(class_index, score)?,
        })
    }
}
