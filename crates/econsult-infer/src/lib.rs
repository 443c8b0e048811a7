//! eConsult Infer — pretrained intent classification.
//!
//! Provides the `IntentBackend` trait. When a model artifact is present in
//! the models directory, `LinearIntentModel` serves real predictions;
//! without it, `NoopClassifier` is used and every comment receives the
//! fixed default label with confidence 0.0.

pub mod classifier;
pub mod linear;

pub use classifier::{IntentBackend, IntentPrediction, NoopClassifier};
pub use linear::LinearIntentModel;

use std::path::Path;
use std::sync::Arc;

/// Create the best available classifier for the given model directory.
///
/// Tries the linear model artifact first, falls back to `NoopClassifier`.
pub fn create_classifier(model_dir: &Path) -> Arc<dyn IntentBackend> {
    match LinearIntentModel::load(model_dir) {
        Ok(model) => Arc::new(model),
        Err(e) => {
            tracing::warn!(
                "Intent model unavailable: {}. Falling back to default predictions.",
                e
            );
            Arc::new(NoopClassifier)
        }
    }
}
