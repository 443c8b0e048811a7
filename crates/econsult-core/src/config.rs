//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to all eConsult data locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Database directory (`data/db/`).
    pub db: PathBuf,
    /// Static output directory (`data/static/`).
    pub static_dir: PathBuf,
    /// Pretrained model artifacts (`data/models/`).
    pub models: PathBuf,
    /// Word-cloud image path (`data/static/wordcloud.png`).
    pub wordcloud_image: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let static_dir = root.join("static");
        let paths = Self {
            db: root.join("db"),
            wordcloud_image: static_dir.join("wordcloud.png"),
            static_dir,
            models: root.join("models"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.db)?;
        std::fs::create_dir_all(&self.static_dir)?;
        std::fs::create_dir_all(&self.models)?;
        Ok(())
    }
}

/// Word-cloud canvas settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudSettings {
    pub width: u32,
    pub height: u32,
    /// Terms requested for the corpus-wide cloud.
    pub top_keywords: usize,
}

impl Default for WordCloudSettings {
    fn default() -> Self {
        Self {
            width: 900,
            height: 500,
            top_keywords: 30,
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconsultConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Word-cloud settings.
    pub wordcloud: WordCloudSettings,
}

impl EconsultConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            wordcloud: WordCloudSettings::default(),
        })
    }
}
