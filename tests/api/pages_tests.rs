//! HTML Page Tests
//!
//! Covers the routes that render or redirect without touching the
//! database: the auth forms and the login wall on mutation routes.

use axum::http::{header, StatusCode};

use crate::common::{body_text, TestApp};

#[tokio::test]
async fn test_login_page_renders() {
    let app = TestApp::new();

    let response = app.get("/login").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Login"));
    assert!(body.contains("name=\"username\""));
    assert!(body.contains("name=\"password\""));
}

#[tokio::test]
async fn test_register_page_renders() {
    let app = TestApp::new();

    let response = app.get("/register").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Register"));
    assert!(body.contains("name=\"email\""));
}

fn assert_redirects_to_login(response: &axum::response::Response) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/login");
}

/// Every mutation route sits behind the login wall: without a session
/// cookie the request is bounced to the login page, not a 401.
#[tokio::test]
async fn test_create_room_requires_login() {
    let app = TestApp::new();
    let response = app.get("/create-room").await;
    assert_redirects_to_login(&response);
}

#[tokio::test]
async fn test_update_room_requires_login() {
    let app = TestApp::new();
    let response = app.get("/update-room/1").await;
    assert_redirects_to_login(&response);
}

#[tokio::test]
async fn test_delete_room_requires_login() {
    let app = TestApp::new();
    let response = app.post_form("/delete-room/1", "").await;
    assert_redirects_to_login(&response);
}

#[tokio::test]
async fn test_delete_message_requires_login() {
    let app = TestApp::new();
    let response = app.get("/delete-message/1").await;
    assert_redirects_to_login(&response);
}

#[tokio::test]
async fn test_update_user_requires_login() {
    let app = TestApp::new();
    let response = app.post_form("/update-user", "username=x&email=x%40example.com").await;
    assert_redirects_to_login(&response);
}

#[tokio::test]
async fn test_logout_without_session_redirects_to_login() {
    let app = TestApp::new();

    let response = app.get("/logout").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/login");
}
