//! Binary linear classifier loaded from an exported artifact
//!
//! Covers the scikit-learn linear models used for this task (logistic
//! regression, passive-aggressive, linear SVM): the decision value is
//! `coef · x + intercept` and a positive value selects `classes[1]`.

use super::{read_artifact, ArtifactError, Classifier, FeatureMatrix};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized classifier state (`coef_` flattened, `intercept_[0]`, `classes_`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coef: Vec<f64>,
    intercept: f64,
    negative_class: i64,
    positive_class: i64,
}

impl LinearClassifier {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: LinearArtifact = read_artifact(path)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self, ArtifactError> {
        if artifact.coef.is_empty() {
            return Err(ArtifactError::Invalid("Classifier has no coefficients".to_string()));
        }
        if !artifact.intercept.is_finite() || artifact.coef.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::Invalid(
                "Classifier weights must be finite".to_string(),
            ));
        }
        let (negative_class, positive_class) = match artifact.classes.as_slice() {
            &[negative, positive] => (negative, positive),
            other => {
                return Err(ArtifactError::Invalid(format!(
                    "Expected a binary classifier, got {} classes",
                    other.len()
                )))
            }
        };

        Ok(Self {
            coef: artifact.coef,
            intercept: artifact.intercept,
            negative_class,
            positive_class,
        })
    }
}

impl Classifier for LinearClassifier {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn decision_function(&self, features: &FeatureMatrix) -> Vec<f64> {
        features
            .iter()
            .map(|row| row.dot(&self.coef) + self.intercept)
            .collect()
    }

    fn predict(&self, features: &FeatureMatrix) -> Vec<i64> {
        self.decision_function(features)
            .into_iter()
            .map(|score| {
                if score > 0.0 {
                    self.positive_class
                } else {
                    self.negative_class
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SparseVector;

    fn row(entries: Vec<(usize, f64)>) -> SparseVector {
        SparseVector { dim: 2, entries }
    }

    #[test]
    fn test_predict_sign() {
        let model = LinearClassifier::from_artifact(LinearArtifact {
            coef: vec![1.0, -1.0],
            intercept: 0.0,
            classes: vec![0, 1],
        })
        .unwrap();

        let features = vec![row(vec![(0, 0.9)]), row(vec![(1, 0.9)]), row(vec![])];
        assert_eq!(model.predict(&features), vec![1, 0, 0]);
        assert_eq!(model.decision_function(&features), vec![0.9, -0.9, 0.0]);
    }

    #[test]
    fn test_intercept_shifts_empty_rows() {
        let model = LinearClassifier::from_artifact(LinearArtifact {
            coef: vec![0.5],
            intercept: 0.25,
            classes: vec![0, 1],
        })
        .unwrap();
        assert_eq!(model.predict(&vec![SparseVector::default()]), vec![1]);
    }

    #[test]
    fn test_non_binary_rejected() {
        let result = LinearClassifier::from_artifact(LinearArtifact {
            coef: vec![1.0],
            intercept: 0.0,
            classes: vec![0, 1, 2],
        });
        assert!(matches!(result, Err(ArtifactError::Invalid(_))));
    }

    #[test]
    fn test_empty_coef_rejected() {
        let result = LinearClassifier::from_artifact(LinearArtifact {
            coef: vec![],
            intercept: 0.0,
            classes: vec![0, 1],
        });
        assert!(result.is_err());
    }
}
