mod common;

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn health_returns_ok() {
    let app = TestApp::new();

    let (status, body) = app.get_text("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn docs_and_openapi_are_available() {
    let app = TestApp::new();

    let (status, html) = app.get_text("/docs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("SwaggerUIBundle"));

    let res = app.get_json("/api-docs/openapi.json").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body.get("openapi").and_then(Value::as_str),
        Some("3.1.0")
    );

    let paths = res
        .body
        .get("paths")
        .and_then(Value::as_object)
        .expect("openapi document misses paths");
    for path in [
        "/api/folders",
        "/api/folders/{id}",
        "/api/notes",
        "/api/notes/{id}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert!(paths["/api/notes/{id}"].get("patch").is_some());
}
