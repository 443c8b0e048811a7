//! eConsult Core — configuration, errors, and shared constants.

pub mod config;
pub mod error;
pub mod labels;

pub use config::{DataPaths, EconsultConfig, WordCloudSettings};
pub use error::{Error, Result};
pub use labels::{DEFAULT_CLAUSE, DEFAULT_INTENT_LABEL, INTENT_LABELS, REDACTED_MARKER};
