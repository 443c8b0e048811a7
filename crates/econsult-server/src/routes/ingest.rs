//! Ingestion routes — single comment, JSON batch, CSV upload.
//!
//! PII redaction happens here, before anything touches the store: stored
//! comment text never contains raw emails or phone numbers.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::Deserialize;
use tracing::warn;

use crate::state::AppState;
use econsult_core::DEFAULT_CLAUSE;
use econsult_store::NewComment;
use econsult_text::redact;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ingest", post(ingest_comment))
        .route("/ingest_json", post(ingest_json))
        .route("/upload_csv", post(upload_csv))
}

#[derive(Deserialize)]
struct IngestForm {
    text: String,
    clause: Option<String>,
}

#[derive(Deserialize)]
struct IngestItem {
    #[serde(default)]
    text: String,
    clause: Option<String>,
}

fn clause_or_default(clause: Option<String>) -> String {
    match clause {
        Some(c) if !c.trim().is_empty() => c,
        _ => DEFAULT_CLAUSE.to_string(),
    }
}

/// POST /ingest — ingest a single comment (form fields `text`, `clause`).
async fn ingest_comment(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IngestForm>,
) -> impl IntoResponse {
    if form.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "text is required" })),
        );
    }

    let text = redact(&form.text);
    let clause = clause_or_default(form.clause);

    match state.store.insert_comment(&text, &clause, None) {
        Ok(id) => (
            StatusCode::OK,
            Json(serde_json::json!({ "ok": true, "id": id })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

/// POST /ingest_json — ingest a JSON array of `{text, clause}` items.
/// Blank-text items are skipped, never rejected.
async fn ingest_json(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Vec<IngestItem>>,
) -> impl IntoResponse {
    let items: Vec<NewComment> = payload
        .into_iter()
        .map(|item| NewComment {
            text: redact(item.text.trim()),
            clause: clause_or_default(item.clause),
            created_at: None,
        })
        .collect();

    match state.store.insert_comments(&items) {
        Ok(ids) => (
            StatusCode::OK,
            Json(serde_json::json!({ "ok": true, "ids": ids })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

/// POST /upload_csv — multipart CSV with columns `Comment`, `Clause`,
/// `Date` (%Y-%m-%d). Blank rows are skipped and bad dates defaulted;
/// only a wholly unreadable payload fails the request.
async fn upload_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "CSV processing error: no file field" })),
            );
        }
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": format!("CSV processing error: {}", e)
                })),
            );
        }
    };

    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": format!("CSV processing error: {}", e)
                })),
            );
        }
    };

    let items = match parse_csv_comments(&bytes) {
        Ok(items) => items,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": format!("CSV processing error: {}", e)
                })),
            );
        }
    };

    match state.store.insert_comments(&items) {
        Ok(ids) => (
            StatusCode::OK,
            Json(serde_json::json!({ "ok": true, "ingested": ids.len() })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

/// Parse CSV rows into redacted `NewComment`s. Malformed rows are skipped
/// rather than failing the batch.
fn parse_csv_comments(bytes: &[u8]) -> csv::Result<Vec<NewComment>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);
    let comment_col = col("Comment");
    let clause_col = col("Clause");
    let date_col = col("Date");

    let mut items = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping malformed CSV row: {}", e);
                continue;
            }
        };

        let text = comment_col
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim();
        if text.is_empty() {
            continue;
        }

        let clause = clause_col
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CLAUSE);

        // Unparseable dates fall back to the insertion timestamp.
        let created_at = date_col
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .and_then(parse_csv_date);

        items.push(NewComment {
            text: redact(text),
            clause: clause.to_string(),
            created_at,
        });
    }
    Ok(items)
}

fn parse_csv_date(raw: &str) -> Option<String> {
    let date = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().to_rfc3339())
}
