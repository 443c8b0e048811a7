//! Shared application state.

use std::sync::Arc;

use econsult_cloud::WordCloudRenderer;
use econsult_core::EconsultConfig;
use econsult_infer::IntentBackend;
use econsult_store::SqliteStore;
use parking_lot::Mutex;

/// Shared application state accessible from all route handlers.
///
/// The classifier and renderer are built once at startup and never mutated
/// afterward; inference and layout are read-only against them.
pub struct AppState {
    pub config: EconsultConfig,
    pub store: SqliteStore,
    pub classifier: Arc<dyn IntentBackend>,
    pub renderer: WordCloudRenderer,
    /// Single-flight guard: overlapping analysis requests serialize here
    /// instead of racing the prediction rebuild.
    pub analysis_lock: Mutex<()>,
}

impl AppState {
    pub fn new(
        config: EconsultConfig,
        store: SqliteStore,
        classifier: Arc<dyn IntentBackend>,
    ) -> Self {
        let renderer = WordCloudRenderer::new(&config.wordcloud);
        Self {
            config,
            store,
            classifier,
            renderer,
            analysis_lock: Mutex::new(()),
        }
    }
}
