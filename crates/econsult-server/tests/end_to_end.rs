//! End-to-end tests driving the real router over a temporary data dir.
//!
//! No HTTP listener: requests go straight through the tower service.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use econsult_core::EconsultConfig;
use econsult_infer::NoopClassifier;
use econsult_server::routes::build_router;
use econsult_server::state::AppState;
use econsult_store::SqliteStore;

fn test_app() -> (tempfile::TempDir, axum::Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = EconsultConfig::from_env(dir.path()).unwrap();
    let store = SqliteStore::open(&config.data_paths.db).unwrap();
    let state = Arc::new(AppState::new(config, store, Arc::new(NoopClassifier)));
    (dir, build_router(state))
}

async fn send_raw(app: &axum::Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let res = send_raw(app, req).await;
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

fn form_post(path: &str, body: &str) -> Request<Body> {
    Request::post(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

fn empty_post(path: &str) -> Request<Body> {
    Request::post(path).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_ingest_analyze_and_read_back() {
    let (_dir, app) = test_app();

    // Ingest a comment with PII; the email must be redacted at rest.
    let (status, body) = send(
        &app,
        form_post("/ingest", "text=Email+me+at+a%40b.com+about+clause+5&clause=5"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["id"].is_number());

    let (status, body) = send(&app, empty_post("/analyze")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], 1);

    let (status, body) = send(&app, get("/comments")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    let text = items[0]["text"].as_str().unwrap();
    assert!(text.contains("[REDACTED]"));
    assert!(!text.contains("a@b.com"));
    assert_eq!(items[0]["clause"], "5");
    // No model artifact: the default prediction applies.
    assert_eq!(items[0]["sentiment"], "REQUEST_CLARIFICATION");
    assert_eq!(items[0]["score"], 0.0);

    let (status, body) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["by_clause"]["5"]["count"], 1);
    assert_eq!(body["overall"]["REQUEST_CLARIFICATION"], 1);
}

#[tokio::test]
async fn test_blank_single_ingest_rejected() {
    let (_dir, app) = test_app();
    let (status, body) = send(&app, form_post("/ingest", "text=+++&clause=1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_ingest_json_skips_blank_items() {
    let (_dir, app) = test_app();
    let payload = serde_json::json!([
        { "text": "First comment", "clause": "1" },
        { "text": "   " },
        { "text": "Second comment" },
    ]);

    let (status, body) = send(&app, json_post("/ingest_json", payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["ids"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_upload_csv() {
    let (_dir, app) = test_app();

    let csv = "Comment,Clause,Date\nGood idea,1,2025-01-01\n,2,\nCall 1234567890,3,bad-date\n";
    let body = format!(
        "--boundary\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"comments.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --boundary--\r\n"
    );
    let req = Request::post("/upload_csv")
        .header(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=boundary",
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["ingested"], 2);

    // The phone number in row three must be redacted.
    send(&app, empty_post("/analyze")).await;
    let (_, body) = send(&app, get("/comments")).await;
    let texts: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["text"].as_str().unwrap())
        .collect();
    assert!(texts.iter().any(|t| t.contains("[REDACTED]")));
}

#[tokio::test]
async fn test_comments_by_keyword() {
    let (_dir, app) = test_app();
    send(
        &app,
        form_post("/ingest", "text=The+tariff+is+too+high.+Reduce+it.&clause=2"),
    )
    .await;
    send(&app, empty_post("/analyze")).await;

    let (status, body) = send(&app, get("/comments_by_keyword?word=tariff")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["word"], "tariff");

    let (status, body) = send(&app, get("/comments_by_keyword?word=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    let (_, body) = send(&app, get("/comments_by_keyword?word=unrelated")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_wordcloud_endpoints() {
    let (_dir, app) = test_app();

    // No analysis yet: no image.
    let (status, body) = send(&app, get("/wordcloud")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    send(
        &app,
        form_post("/ingest", "text=Policy+feedback+about+tariff+schedules.&clause=1"),
    )
    .await;
    send(&app, empty_post("/analyze")).await;

    let res = send_raw(&app, get("/wordcloud")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let (status, body) = send(&app, get("/wordcloud_map")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["width"], 900);
    assert_eq!(body["height"], 500);
    let words = body["words"].as_array().unwrap();
    assert!(!words.is_empty());
    for word in words {
        assert!(word["text"].is_string());
        assert!(word["font_size"].is_number());
        assert!(word["x"].is_number());
        assert!(word["y"].is_number());
        assert!(word["orientation"].is_number());
    }
}

#[tokio::test]
async fn test_clear_resets_everything() {
    let (_dir, app) = test_app();
    send(&app, form_post("/ingest", "text=A+comment&clause=1")).await;
    send(&app, empty_post("/analyze")).await;

    let (status, body) = send(&app, empty_post("/clear")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["message"].is_string());

    let (_, body) = send(&app, get("/comments")).await;
    assert!(body["items"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, get("/metrics")).await;
    assert_eq!(body["total"], 0);

    // A rerun over the empty set processes nothing.
    let (_, body) = send(&app, empty_post("/analyze")).await;
    assert_eq!(body["processed"], 0);
}

#[tokio::test]
async fn test_root_redirects_to_dashboard() {
    let (_dir, app) = test_app();

    let res = send_raw(&app, get("/")).await;
    assert!(res.status().is_redirection());
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/ui");

    let res = send_raw(&app, get("/ui")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("eConsultation"));
}
