//! Word-cloud routes — rendered image and interactive layout data.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;
use econsult_text::extract_keywords;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wordcloud", get(wordcloud_image))
        .route("/wordcloud_map", get(wordcloud_map))
}

/// GET /wordcloud — the PNG generated by the last analysis run.
async fn wordcloud_image(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let path = &state.config.data_paths.wordcloud_image;
    match std::fs::read(path) {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            bytes,
        )
            .into_response(),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Run /analyze first to generate wordcloud.png"
            })),
        )
            .into_response(),
    }
}

/// GET /wordcloud_map — per-word layout records recomputed from the
/// current corpus, for client-side rendering.
async fn wordcloud_map(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let comments = match state.store.all_comments() {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    let freqs = extract_keywords(&texts, state.config.wordcloud.top_keywords);
    let words = state.renderer.layout(&freqs);

    Json(serde_json::json!({
        "width": state.renderer.width(),
        "height": state.renderer.height(),
        "words": words,
    }))
    .into_response()
}
