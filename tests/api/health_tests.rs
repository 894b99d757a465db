//! Health Endpoint Tests

use axum::http::StatusCode;

use crate::common::{body_text, TestApp};

/// The basic health check answers without touching the database.
#[tokio::test]
async fn test_health_check_is_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

/// Readiness reports unavailable when the database cannot be reached.
#[tokio::test]
async fn test_readiness_reports_database_down() {
    let app = TestApp::new();

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["database"], "down");
}
