//! Message entity and repository trait.
//!
//! Maps to the `messages` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A message posted by a user in a room.
///
/// Maps to the `messages` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - room_id: BIGINT NOT NULL REFERENCES rooms ON DELETE CASCADE
/// - user_id: BIGINT NOT NULL REFERENCES users ON DELETE CASCADE
/// - body: TEXT NOT NULL
/// - updated_at / created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Deleting a room deletes its messages; a message never outlives its
/// room or author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub room_id: i64,
    pub user_id: i64,
    pub body: String,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// First 50 characters of the body, for listings and the delete
    /// confirmation page.
    pub fn preview(&self) -> String {
        self.body.chars().take(50).collect()
    }

    /// True when `user_id` authored the message.
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Denormalized message row carrying the author and room names the
/// templates display.
#[derive(Debug, Clone, Serialize)]
pub struct MessageSummary {
    pub id: i64,
    pub room_id: i64,
    pub room_name: String,
    pub user_id: i64,
    pub username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for Message data access operations.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find a message by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError>;

    /// Insert a new message. `user_id` is bound as-is; a missing user
    /// fails the insert at the NOT NULL constraint.
    async fn create(
        &self,
        room_id: i64,
        user_id: Option<i64>,
        body: &str,
    ) -> Result<Message, AppError>;

    /// Delete a message by ID.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Messages in a room, `updated_at DESC, created_at DESC`.
    async fn find_by_room(&self, room_id: i64) -> Result<Vec<MessageSummary>, AppError>;

    /// Messages authored by a user, default ordering.
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<MessageSummary>, AppError>;

    /// The newest messages whose room's topic name contains `q`
    /// (case-insensitive), newest-created first.
    async fn recent_by_topic(&self, q: &str, limit: i64)
        -> Result<Vec<MessageSummary>, AppError>;

    /// Every message, newest-created first, no limit.
    async fn list_recent(&self) -> Result<Vec<MessageSummary>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_message(body: &str) -> Message {
        let now = Utc::now();
        Message {
            id: 1,
            room_id: 2,
            user_id: 3,
            body: body.to_string(),
            updated_at: now,
            created_at: now,
        }
    }

    #[test]
    fn test_preview_returns_short_body_unchanged() {
        let message = create_test_message("Hi everyone");
        assert_eq!(message.preview(), "Hi everyone");
    }

    #[test]
    fn test_preview_truncates_to_fifty_chars() {
        let message = create_test_message(&"x".repeat(80));
        assert_eq!(message.preview().len(), 50);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let message = create_test_message(&"ü".repeat(60));
        assert_eq!(message.preview().chars().count(), 50);
    }

    #[test]
    fn test_is_authored_by() {
        let message = create_test_message("Hi");

        assert!(message.is_authored_by(3));
        assert!(!message.is_authored_by(4));
    }
}
