//! Read API Tests

use axum::http::StatusCode;

use crate::common::{body_text, TestApp};

/// `GET /api` serves the static route listing.
#[tokio::test]
async fn test_api_root_lists_routes() {
    let app = TestApp::new();

    let response = app.get("/api").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let routes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    assert!(routes.contains(&"GET /api"));
    assert!(routes.contains(&"GET /api/rooms/"));
    assert!(routes.contains(&"GET /api/rooms/{id}"));
}

/// A non-numeric room id is rejected before any lookup happens.
#[tokio::test]
async fn test_api_room_with_invalid_id_is_bad_request() {
    let app = TestApp::new();

    let response = app.get("/api/rooms/not-a-number").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["message"], "Invalid room ID");
}

/// Unknown paths under /api are plain 404s.
#[tokio::test]
async fn test_api_unknown_path_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/users/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
