//! eConsult — consultation-comment analytics server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use econsult_server::routes;
use econsult_server::state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("ECONSULT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = econsult_core::EconsultConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = econsult_store::SqliteStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    // Load the intent model once; absence degrades to default predictions.
    let classifier = econsult_infer::create_classifier(&config.data_paths.models);
    if classifier.is_available() {
        info!("Intent model loaded");
    }

    let state = Arc::new(AppState::new(config, store, classifier));

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("eConsult server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
