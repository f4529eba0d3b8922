//! TF-IDF vectorizer loaded from an exported artifact
//!
//! Mirrors scikit-learn's `TfidfVectorizer.transform` for word analyzers:
//! default token pattern `\b\w\w+\b` (with [`WORD_CHAR`] as `\w`),
//! optional lower-casing, stop words and word n-grams, raw or sublinear
//! term frequency, idf weighting, then row normalization.

use crate::normalize::WORD_CHAR;

use super::{read_artifact, ArtifactError, FeatureMatrix, FeatureVectorizer, SparseVector};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Maximal runs of two or more word characters, i.e. `\b\w\w+\b` with the
/// training pipeline's notion of `\w`
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{}{{2,}}", WORD_CHAR)).expect("token regex"));

/// Row normalization applied after idf weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    /// Term (or space-joined n-gram) to column index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    pub idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    /// `null` in the artifact disables normalization
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub stop_words: Vec<String>,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    /// Load from a JSON artifact file
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: TfidfArtifact = read_artifact(path)?;
        Self::from_artifact(artifact)
    }

    /// Build from an in-memory artifact, checking its consistency
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self, ArtifactError> {
        if artifact.vocabulary.is_empty() {
            return Err(ArtifactError::Invalid("Vectorizer vocabulary is empty".to_string()));
        }
        if artifact.idf.len() != artifact.vocabulary.len() {
            return Err(ArtifactError::Invalid(format!(
                "Vectorizer has {} idf weights for {} vocabulary terms",
                artifact.idf.len(),
                artifact.vocabulary.len()
            )));
        }
        if let Some((term, &column)) = artifact
            .vocabulary
            .iter()
            .find(|(_, &column)| column >= artifact.idf.len())
        {
            return Err(ArtifactError::Invalid(format!(
                "Vocabulary term '{}' maps to column {} outside {} features",
                term,
                column,
                artifact.idf.len()
            )));
        }
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ArtifactError::Invalid(format!(
                "Invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            stop_words: artifact.stop_words.into_iter().collect(),
        })
    }

    /// Split a document into analyzer terms (tokens and n-grams)
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = TOKEN
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    fn transform_one(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| {
                let tf = if self.sublinear_tf { tf.ln() + 1.0 } else { tf };
                (column, tf * self.idf[column])
            })
            .collect();

        let scale = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 {
            for (_, value) in entries.iter_mut() {
                *value /= scale;
            }
        }

        SparseVector {
            dim: self.idf.len(),
            entries,
        }
    }
}

impl FeatureVectorizer for TfidfVectorizer {
    fn n_features(&self) -> usize {
        self.idf.len()
    }

    fn transform(&self, texts: &[&str]) -> FeatureMatrix {
        texts.iter().map(|text| self.transform_one(text)).collect()
    }
}
