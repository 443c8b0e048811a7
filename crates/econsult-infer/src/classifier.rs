//! Intent classification trait and the no-model fallback.

use econsult_core::DEFAULT_INTENT_LABEL;

/// Result of classifying one comment.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentPrediction {
    pub label: String,
    /// Argmax class probability, in [0, 1].
    pub confidence: f64,
}

impl IntentPrediction {
    /// Fixed prediction used when no model is loaded or inference degrades.
    pub fn fallback() -> Self {
        Self {
            label: DEFAULT_INTENT_LABEL.to_string(),
            confidence: 0.0,
        }
    }
}

/// Trait for intent classification backends.
pub trait IntentBackend: Send + Sync {
    /// Classify a single text. Returns None when the backend cannot produce
    /// a prediction; callers substitute `IntentPrediction::fallback()`.
    fn classify(&self, text: &str) -> Option<IntentPrediction>;

    /// Check if a real model is loaded.
    fn is_available(&self) -> bool;
}

/// Placeholder backend used when no model artifact is present.
pub struct NoopClassifier;

impl IntentBackend for NoopClassifier {
    fn classify(&self, _text: &str) -> Option<IntentPrediction> {
        None
    }

    fn is_available(&self) -> bool {
        false
    }
}
