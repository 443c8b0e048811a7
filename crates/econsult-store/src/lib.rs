//! eConsult Store — SQLite persistence for comments and predictions.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::SqliteStore;
pub use types::{AnalyzedComment, Comment, NewComment, NewPrediction, Prediction};
