//! Database schema SQL.

/// Core tables: comments and their regenerated predictions.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    clause TEXT NOT NULL DEFAULT 'overall',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS predictions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    comment_id INTEGER NOT NULL,
    sentiment TEXT NOT NULL,
    sentiment_score REAL NOT NULL,
    summary TEXT NOT NULL,
    keywords_json TEXT NOT NULL,
    clause TEXT NOT NULL DEFAULT 'overall',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_predictions_comment ON predictions(comment_id);
"#;
