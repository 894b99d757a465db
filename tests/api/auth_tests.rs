//! Authentication Flow Tests
//!
//! The credential flows themselves are covered at the service level;
//! these exercise the HTTP shape of the form-validation paths, which
//! re-render without touching the database.

use axum::http::StatusCode;

use crate::common::{body_text, TestApp};

/// An empty login form re-renders with the one generic message; the
/// response never says whether the user exists.
#[tokio::test]
async fn test_login_with_empty_fields_re_renders_with_generic_message() {
    let app = TestApp::new();

    let response = app.post_form("/login", "username=&password=").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Username or password does not exist"));
    assert!(body.contains("name=\"username\""));
}

/// Registration with a malformed email re-renders the form with the
/// field's validation message.
#[tokio::test]
async fn test_register_with_invalid_email_re_renders_with_message() {
    let app = TestApp::new();

    let response = app
        .post_form("/register", "username=bob&email=not-an-email&password=ValidPassword123")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Invalid email format"));
    assert!(body.contains("Register"));
}

/// Registration with a short password is rejected before any user is
/// created.
#[tokio::test]
async fn test_register_with_short_password_re_renders_with_message() {
    let app = TestApp::new();

    let response = app
        .post_form("/register", "username=bob&email=bob%40example.com&password=short")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Password must be at least 8 characters"));
}
