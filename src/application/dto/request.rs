//! Request DTOs
//!
//! Validated input structs, one per form-backed operation.

use serde::Deserialize;
use validator::Validate;

/// Login form
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration form
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 2, max = 150, message = "Username must be 2-150 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Room create/update form. Creation and editing share the same
/// fields; the topic is given by name and resolved to a row on save.
#[derive(Debug, Deserialize, Validate)]
pub struct RoomForm {
    #[validate(length(min = 1, max = 200, message = "Topic is required"))]
    pub topic: String,

    #[validate(length(min = 1, max = 200, message = "Room name is required"))]
    pub name: String,

    pub description: Option<String>,
}

/// Message post form (the POST body on the room page)
#[derive(Debug, Deserialize, Validate)]
pub struct MessageForm {
    #[validate(length(min = 1, message = "Message body is required"))]
    pub body: String,
}

/// Profile update form: username and email only
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserForm {
    #[validate(length(min = 2, max = 150, message = "Username must be 2-150 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Search query parameters. A missing `q` matches everything.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn q(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}
