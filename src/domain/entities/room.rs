//! Room entity and repository trait.
//!
//! Maps to the `rooms` table plus the `room_participants` join table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;
use crate::shared::error::AppError;

/// A discussion room created by a host and tagged with a topic.
///
/// Maps to the `rooms` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - host_id: BIGINT NULL REFERENCES users ON DELETE SET NULL
/// - topic_id: BIGINT NULL REFERENCES topics ON DELETE SET NULL
/// - name: VARCHAR(200) NOT NULL
/// - description: TEXT NULL
/// - updated_at / created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// The host/topic references go NULL when the referenced row is
/// deleted; the room itself survives. Listing order everywhere is
/// `updated_at DESC, created_at DESC`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Primary key
    pub id: i64,

    /// The user who created the room; NULL after host deletion
    pub host_id: Option<i64>,

    /// The room's topic; NULL after topic deletion
    pub topic_id: Option<i64>,

    /// Room name
    pub name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Refreshed on every save
    pub updated_at: DateTime<Utc>,

    /// Immutable after first save
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// True when `user_id` is the room's host.
    pub fn is_hosted_by(&self, user_id: i64) -> bool {
        self.host_id == Some(user_id)
    }
}

/// Denormalized room row for listings and pages: carries the topic and
/// host names the templates display.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub host_id: Option<i64>,
    pub host_username: Option<String>,
    pub topic_name: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for Room data access operations.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find a room by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Room>, AppError>;

    /// Find a room with its topic and host names joined in.
    async fn find_summary(&self, id: i64) -> Result<Option<RoomSummary>, AppError>;

    /// Insert a new room; the database assigns the id and timestamps.
    async fn create(
        &self,
        host_id: i64,
        topic_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Room, AppError>;

    /// Overwrite topic, name and description; refreshes `updated_at`.
    async fn update(&self, room: &Room) -> Result<Room, AppError>;

    /// Delete a room. Its messages and participant rows go with it.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Rooms where `q` is a case-insensitive substring of the room
    /// name, the description, or the topic name. An empty query
    /// matches every room.
    async fn search(&self, q: &str) -> Result<Vec<RoomSummary>, AppError>;

    /// Rooms hosted by the given user.
    async fn find_by_host(&self, user_id: i64) -> Result<Vec<RoomSummary>, AppError>;

    /// All rooms, default ordering.
    async fn list_all(&self) -> Result<Vec<Room>, AppError>;

    /// Users who have posted in the room.
    async fn participants(&self, room_id: i64) -> Result<Vec<User>, AppError>;

    /// Add a user to the room's participant set. Adding an existing
    /// member is a no-op.
    async fn add_participant(&self, room_id: i64, user_id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_room() -> Room {
        let now = Utc::now();
        Room {
            id: 1,
            host_id: Some(7),
            topic_id: Some(3),
            name: "Django Basics".to_string(),
            description: Some("Beginner questions welcome".to_string()),
            updated_at: now,
            created_at: now,
        }
    }

    #[test]
    fn test_is_hosted_by_matches_host() {
        let room = create_test_room();

        assert!(room.is_hosted_by(7));
        assert!(!room.is_hosted_by(8));
    }

    #[test]
    fn test_is_hosted_by_false_when_host_deleted() {
        let mut room = create_test_room();
        room.host_id = None;

        assert!(!room.is_hosted_by(7));
    }

    #[test]
    fn test_room_serializes_nullable_references() {
        let mut room = create_test_room();
        room.topic_id = None;

        let serialized = serde_json::to_string(&room).unwrap();

        assert!(serialized.contains("\"topic_id\":null"));
        assert!(serialized.contains("\"host_id\":7"));
    }
}
