//! SQLite store for comments and predictions.
//!
//! Single-file database, WAL journal, one connection behind a mutex —
//! sized for a single-process, single-writer workload.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use tracing::info;

use crate::schema::SCHEMA_SQL;
use crate::types::*;
use econsult_core::{Error, Result};

pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store. `db_dir` is the database directory; the
    /// file will be `db_dir/econsult.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("econsult.db");

        let conn = Connection::open(&db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let comments = store.count_comments()?;
        let predictions = store.count_predictions()?;
        info!(
            "SqliteStore initialized: {} comments, {} predictions, path={}",
            comments,
            predictions,
            store.db_path.display()
        );

        Ok(store)
    }

    // ---------------------------------------------------------------
    // Comments
    // ---------------------------------------------------------------

    /// Insert one comment. Returns the assigned id.
    pub fn insert_comment(
        &self,
        text: &str,
        clause: &str,
        created_at: Option<&str>,
    ) -> Result<i64> {
        let now = created_at
            .map(str::to_string)
            .unwrap_or_else(now_rfc3339);

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached("INSERT INTO comments (text, clause, created_at) VALUES (?1, ?2, ?3)")
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![text, clause, now])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    /// Bulk-insert comments inside one transaction. Items with blank text
    /// are skipped. Assigned ids are collected from each insert directly,
    /// so there is no read-back between writers.
    pub fn insert_comments(&self, items: &[NewComment]) -> Result<Vec<i64>> {
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut ids = Vec::new();
        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT INTO comments (text, clause, created_at) VALUES (?1, ?2, ?3)",
                )
                .map_err(|e| Error::Database(e.to_string()))?;

            for item in items {
                if item.text.trim().is_empty() {
                    continue;
                }
                let created_at = item
                    .created_at
                    .clone()
                    .unwrap_or_else(now_rfc3339);
                let id = stmt
                    .insert(params![item.text, item.clause, created_at])
                    .map_err(|e| Error::Database(e.to_string()))?;
                ids.push(id);
            }
        }
        tx.commit().map_err(|e| Error::Database(e.to_string()))?;
        Ok(ids)
    }

    /// All comments in insertion order.
    pub fn all_comments(&self) -> Result<Vec<Comment>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT id, text, clause, created_at FROM comments ORDER BY id")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row_to_comment(row))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn count_comments(&self) -> Result<i64> {
        self.count_rows("SELECT COUNT(*) FROM comments")
    }

    // ---------------------------------------------------------------
    // Predictions
    // ---------------------------------------------------------------

    /// Insert a prediction row. Keywords are serialized as a JSON array.
    pub fn insert_prediction(&self, pred: &NewPrediction) -> Result<i64> {
        let keywords_json = serde_json::to_string(&pred.keywords)?;
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO predictions
                 (comment_id, sentiment, sentiment_score, summary, keywords_json, clause, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                pred.comment_id,
                pred.sentiment,
                pred.sentiment_score,
                pred.summary,
                keywords_json,
                pred.clause,
                now_rfc3339(),
            ])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    pub fn all_predictions(&self) -> Result<Vec<Prediction>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, comment_id, sentiment, sentiment_score, summary,
                        keywords_json, clause, created_at
                 FROM predictions ORDER BY id",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row_to_prediction(row))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn count_predictions(&self) -> Result<i64> {
        self.count_rows("SELECT COUNT(*) FROM predictions")
    }

    /// Delete every prediction (full-rebuild policy). Returns rows removed.
    pub fn delete_all_predictions(&self) -> Result<usize> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM predictions", [])
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Delete all predictions and comments. Predictions have no independent
    /// existence once the comment set is cleared.
    pub fn clear_all(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM predictions", [])
            .map_err(|e| Error::Database(e.to_string()))?;
        conn.execute("DELETE FROM comments", [])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Joined read model
    // ---------------------------------------------------------------

    /// All predictions joined with their comments. Predictions whose
    /// comment has vanished are skipped by the join.
    pub fn analyzed_comments(&self) -> Result<Vec<AnalyzedComment>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT c.id, c.text, c.clause, p.sentiment, p.sentiment_score,
                        p.summary, p.keywords_json, c.created_at
                 FROM predictions p
                 JOIN comments c ON c.id = p.comment_id
                 ORDER BY p.id",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row_to_analyzed(row))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Analyzed comments matching `term`: case-insensitive substring of the
    /// comment text, or exact case-insensitive match against any extracted
    /// keyword.
    pub fn find_by_keyword(&self, term: &str) -> Result<Vec<AnalyzedComment>> {
        let needle = term.to_lowercase();
        let matches = self
            .analyzed_comments()?
            .into_iter()
            .filter(|item| {
                item.text.to_lowercase().contains(&needle)
                    || item.keywords.iter().any(|k| k.to_lowercase() == needle)
            })
            .collect();
        Ok(matches)
    }

    fn count_rows(&self, sql: &str) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row(sql, [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn row_to_comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        text: row.get(1)?,
        clause: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn row_to_prediction(row: &Row<'_>) -> rusqlite::Result<Prediction> {
    Ok(Prediction {
        id: row.get(0)?,
        comment_id: row.get(1)?,
        sentiment: row.get(2)?,
        sentiment_score: row.get(3)?,
        summary: row.get(4)?,
        keywords_json: row.get(5)?,
        clause: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn row_to_analyzed(row: &Row<'_>) -> rusqlite::Result<AnalyzedComment> {
    let keywords_json: String = row.get(6)?;
    let score: f64 = row.get(4)?;
    Ok(AnalyzedComment {
        id: row.get(0)?,
        text: row.get(1)?,
        clause: row.get(2)?,
        sentiment: row.get(3)?,
        score: (score * 1000.0).round() / 1000.0,
        summary: row.get(5)?,
        // Tolerate malformed keyword payloads: treat them as empty.
        keywords: serde_json::from_str(&keywords_json).unwrap_or_default(),
        created_at: row.get(7)?,
    })
}
