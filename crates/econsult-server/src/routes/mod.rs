//! HTTP route handlers for the consultation dashboard API.

pub mod analysis;
pub mod comments;
pub mod ingest;
pub mod wordcloud;

use std::sync::Arc;

use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dashboard::DASHBOARD_HTML;
use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/ui") }))
        .route("/ui", get(|| async { Html(DASHBOARD_HTML) }))
        .merge(ingest::routes())
        .merge(analysis::routes())
        .merge(comments::routes())
        .merge(wordcloud::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
