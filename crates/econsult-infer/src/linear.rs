//! Linear intent model loaded from a JSON artifact.
//!
//! The artifact is an export of the training pipeline: a TF-IDF
//! vectorizer (vocabulary + idf weights) followed by multinomial logistic
//! regression (one coefficient row and intercept per label). Inference is
//! tf·idf → L2 normalize → linear scores → softmax → argmax.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::classifier::{IntentBackend, IntentPrediction};
use econsult_core::{Error, Result};

/// Artifact filename inside the models directory.
pub const MODEL_FILENAME: &str = "intent_model.json";

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    labels: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

/// TF-IDF + multinomial logistic regression backend.
pub struct LinearIntentModel {
    labels: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearIntentModel {
    /// Load the artifact from `model_dir`. Fails when the file is absent,
    /// unparseable, or internally inconsistent.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let path = model_dir.join(MODEL_FILENAME);
        if !path.exists() {
            return Err(Error::Inference(format!(
                "model artifact not found: {}",
                path.display()
            )));
        }

        let raw = std::fs::read_to_string(&path)?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)?;
        let model = Self::from_artifact(artifact)?;

        info!(
            "Loaded intent model: {} labels, {} vocabulary terms",
            model.labels.len(),
            model.vocabulary.len()
        );
        Ok(model)
    }

    fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let ModelArtifact {
            labels,
            vocabulary,
            idf,
            coefficients,
            intercepts,
        } = artifact;

        let classes = labels.len();
        let dim = idf.len();

        if classes == 0 {
            return Err(Error::Inference("model has no labels".into()));
        }
        if coefficients.len() != classes || intercepts.len() != classes {
            return Err(Error::Inference(format!(
                "label/coefficient mismatch: {} labels, {} rows, {} intercepts",
                classes,
                coefficients.len(),
                intercepts.len()
            )));
        }
        if coefficients.iter().any(|row| row.len() != dim) {
            return Err(Error::Inference("coefficient row width != idf length".into()));
        }
        if vocabulary.values().any(|&idx| idx >= dim) {
            return Err(Error::Inference("vocabulary index out of range".into()));
        }

        Ok(Self {
            labels,
            vocabulary,
            idf,
            coefficients,
            intercepts,
        })
    }

    /// Sparse tf·idf features for one text, L2-normalized.
    fn vectorize(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            if let Some(&idx) = self.vocabulary.get(word.to_lowercase().as_str()) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in features.iter_mut() {
                *v /= norm;
            }
        }
        features
    }
}

impl IntentBackend for LinearIntentModel {
    fn classify(&self, text: &str) -> Option<IntentPrediction> {
        let features = self.vectorize(text);

        let mut scores: Vec<f64> = self.intercepts.clone();
        for (class, row) in self.coefficients.iter().enumerate() {
            for &(idx, value) in &features {
                scores[class] += row[idx] * value;
            }
        }

        // Stable softmax.
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return None;
        }
        let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }

        let (best, best_exp) = exp
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;

        Some(IntentPrediction {
            label: self.labels[best].clone(),
            confidence: best_exp / total,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_artifact(dir: &Path, value: serde_json::Value) {
        std::fs::write(dir.join(MODEL_FILENAME), value.to_string()).unwrap();
    }

    fn toy_artifact() -> serde_json::Value {
        json!({
            "labels": ["AGREE", "DISAGREE"],
            "vocabulary": {"good": 0, "bad": 1},
            "idf": [1.0, 1.0],
            "coefficients": [[2.0, -2.0], [-2.0, 2.0]],
            "intercepts": [0.0, 0.0],
        })
    }

    #[test]
    fn test_load_and_classify() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), toy_artifact());

        let model = LinearIntentModel::load(dir.path()).unwrap();
        assert!(model.is_available());

        let pred = model.classify("a good good proposal").unwrap();
        assert_eq!(pred.label, "AGREE");
        assert!(pred.confidence > 0.5);
        assert!(pred.confidence <= 1.0);

        let pred = model.classify("bad idea").unwrap();
        assert_eq!(pred.label, "DISAGREE");
    }

    #[test]
    fn test_empty_text_still_predicts() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), toy_artifact());

        let model = LinearIntentModel::load(dir.path()).unwrap();
        let pred = model.classify("").unwrap();
        assert!(pred.confidence > 0.0);
    }

    #[test]
    fn test_missing_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LinearIntentModel::load(dir.path()).is_err());
    }

    #[test]
    fn test_inconsistent_artifact_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            json!({
                "labels": ["AGREE"],
                "vocabulary": {"good": 5},
                "idf": [1.0],
                "coefficients": [[1.0]],
                "intercepts": [0.0],
            }),
        );
        assert!(LinearIntentModel::load(dir.path()).is_err());
    }
}
