//! Analysis routes — run the pipeline and report aggregated metrics.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::pipeline::run_analysis;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/metrics", get(get_metrics))
}

/// POST /analyze — rebuild all predictions from the current comment set.
async fn analyze(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match run_analysis(&state) {
        Ok(processed) => (
            StatusCode::OK,
            Json(serde_json::json!({ "ok": true, "processed": processed })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

/// GET /metrics — intent label distribution, overall and per clause.
async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let predictions = match state.store.all_predictions() {
        Ok(p) => p,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            );
        }
    };

    let mut overall: BTreeMap<String, i64> = BTreeMap::new();
    let mut by_clause: BTreeMap<String, ClauseBucket> = BTreeMap::new();

    for pred in &predictions {
        let label = if pred.sentiment.is_empty() {
            "UNKNOWN"
        } else {
            pred.sentiment.as_str()
        };
        *overall.entry(label.to_string()).or_insert(0) += 1;

        let bucket = by_clause.entry(pred.clause.clone()).or_default();
        bucket.count += 1;
        *bucket.labels.entry(label.to_string()).or_insert(0) += 1;
    }

    let by_clause_json: serde_json::Map<String, serde_json::Value> = by_clause
        .into_iter()
        .map(|(clause, bucket)| {
            let mut obj = serde_json::Map::new();
            obj.insert("count".to_string(), bucket.count.into());
            for (label, n) in bucket.labels {
                obj.insert(label, n.into());
            }
            (clause, serde_json::Value::Object(obj))
        })
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "overall": overall,
            "by_clause": by_clause_json,
            "total": predictions.len(),
        })),
    )
}

#[derive(Default)]
struct ClauseBucket {
    count: i64,
    labels: BTreeMap<String, i64>,
}
