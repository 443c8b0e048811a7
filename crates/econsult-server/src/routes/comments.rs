//! Comment read and clear routes.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/comments", get(list_comments))
        .route("/comments_by_keyword", get(comments_by_keyword))
        .route("/clear", post(clear_all))
}

/// GET /comments — all comments with their predictions.
async fn list_comments(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.analyzed_comments() {
        Ok(items) => (
            StatusCode::OK,
            Json(serde_json::json!({ "items": items })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

#[derive(Deserialize)]
struct KeywordQuery {
    #[serde(default)]
    word: String,
}

/// GET /comments_by_keyword?word= — comments whose text or extracted
/// keywords match the given term.
async fn comments_by_keyword(
    State(state): State<Arc<AppState>>,
    Query(query): Query<KeywordQuery>,
) -> impl IntoResponse {
    let word = query.word.trim();
    if word.is_empty() {
        return (
            StatusCode::OK,
            Json(serde_json::json!({ "items": [], "word": query.word, "count": 0 })),
        );
    }

    match state.store.find_by_keyword(word) {
        Ok(items) => {
            let count = items.len();
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "items": items,
                    "word": word,
                    "count": count,
                })),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

/// POST /clear — delete all comments and predictions.
async fn clear_all(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.clear_all() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "ok": true,
                "message": "All comments and predictions cleared.",
            })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}
