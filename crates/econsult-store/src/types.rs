//! Data types for comments, predictions, and the joined read model.

use serde::{Deserialize, Serialize};

/// A stored consultation comment. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    /// Comment text, PII-redacted at ingestion.
    pub text: String,
    pub clause: String,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

/// A comment pending insertion.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub clause: String,
    /// RFC 3339 timestamp; the store fills in "now" when absent.
    pub created_at: Option<String>,
}

/// A stored analysis result, fully rebuilt on every analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: i64,
    /// Soft reference to `Comment::id`.
    pub comment_id: i64,
    pub sentiment: String,
    pub sentiment_score: f64,
    pub summary: String,
    /// JSON array of keyword strings, ordered by weight.
    pub keywords_json: String,
    pub clause: String,
    pub created_at: String,
}

/// A prediction pending insertion.
#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub comment_id: i64,
    pub sentiment: String,
    pub sentiment_score: f64,
    pub summary: String,
    pub keywords: Vec<String>,
    pub clause: String,
}

/// A comment joined with its prediction, as served by the read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedComment {
    pub id: i64,
    pub text: String,
    pub clause: String,
    pub sentiment: String,
    /// Confidence rounded to three decimals.
    pub score: f64,
    pub summary: String,
    pub keywords: Vec<String>,
    pub created_at: String,
}
