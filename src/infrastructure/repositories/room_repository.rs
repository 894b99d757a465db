//! Room Repository Implementation
//!
//! PostgreSQL implementation of the RoomRepository trait, including
//! the three-field search and the participants join table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::contains_pattern;
use crate::domain::{Room, RoomRepository, RoomSummary, User};
use crate::shared::error::AppError;

/// Internal row type matching the rooms table schema.
#[derive(Debug, sqlx::FromRow)]
struct RoomRow {
    id: i64,
    host_id: Option<i64>,
    topic_id: Option<i64>,
    name: String,
    description: Option<String>,
    updated_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl RoomRow {
    fn into_room(self) -> Room {
        Room {
            id: self.id,
            host_id: self.host_id,
            topic_id: self.topic_id,
            name: self.name,
            description: self.description,
            updated_at: self.updated_at,
            created_at: self.created_at,
        }
    }
}

/// Internal row type for listing queries with host and topic joined in.
#[derive(Debug, sqlx::FromRow)]
struct RoomSummaryRow {
    id: i64,
    name: String,
    description: Option<String>,
    host_id: Option<i64>,
    host_username: Option<String>,
    topic_name: Option<String>,
    updated_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl RoomSummaryRow {
    fn into_summary(self) -> RoomSummary {
        RoomSummary {
            id: self.id,
            name: self.name,
            description: self.description,
            host_id: self.host_id,
            host_username: self.host_username,
            topic_name: self.topic_name,
            updated_at: self.updated_at,
            created_at: self.created_at,
        }
    }
}

/// Internal row type for participant queries.
#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ParticipantRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SUMMARY_SELECT: &str = r#"
    SELECT r.id, r.name, r.description, r.host_id,
           u.username AS host_username, t.name AS topic_name,
           r.updated_at, r.created_at
    FROM rooms r
    LEFT JOIN users u ON u.id = r.host_id
    LEFT JOIN topics t ON t.id = r.topic_id
"#;

/// PostgreSQL room repository implementation.
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Room>, AppError> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, host_id, topic_id, name, description, updated_at, created_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_room()))
    }

    async fn find_summary(&self, id: i64) -> Result<Option<RoomSummary>, AppError> {
        let row = sqlx::query_as::<_, RoomSummaryRow>(&format!(
            "{SUMMARY_SELECT} WHERE r.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_summary()))
    }

    async fn create(
        &self,
        host_id: i64,
        topic_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Room, AppError> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            INSERT INTO rooms (host_id, topic_id, name, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, host_id, topic_id, name, description, updated_at, created_at
            "#,
        )
        .bind(host_id)
        .bind(topic_id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_room())
    }

    /// Overwrites topic, name and description. `updated_at` is always
    /// refreshed; `created_at` is never touched.
    async fn update(&self, room: &Room) -> Result<Room, AppError> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            UPDATE rooms
            SET topic_id = $2,
                name = $3,
                description = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, host_id, topic_id, name, description, updated_at, created_at
            "#,
        )
        .bind(room.id)
        .bind(room.topic_id)
        .bind(&room.name)
        .bind(&room.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", room.id)))?;

        Ok(row.into_room())
    }

    /// Deletes the room; messages and participant rows cascade away
    /// with it.
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Room with id {} not found", id)));
        }

        Ok(())
    }

    /// Case-insensitive containment across room name, description and
    /// topic name. Most recently updated rooms come first.
    async fn search(&self, q: &str) -> Result<Vec<RoomSummary>, AppError> {
        let pattern = contains_pattern(q);

        let rows = sqlx::query_as::<_, RoomSummaryRow>(&format!(
            r#"
            {SUMMARY_SELECT}
            WHERE t.name ILIKE $1
               OR r.name ILIKE $1
               OR r.description ILIKE $1
            ORDER BY r.updated_at DESC, r.created_at DESC
            "#
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    async fn find_by_host(&self, user_id: i64) -> Result<Vec<RoomSummary>, AppError> {
        let rows = sqlx::query_as::<_, RoomSummaryRow>(&format!(
            r#"
            {SUMMARY_SELECT}
            WHERE r.host_id = $1
            ORDER BY r.updated_at DESC, r.created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    async fn list_all(&self) -> Result<Vec<Room>, AppError> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, host_id, topic_id, name, description, updated_at, created_at
            FROM rooms
            ORDER BY updated_at DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_room()).collect())
    }

    async fn participants(&self, room_id: i64) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.created_at, u.updated_at
            FROM users u
            JOIN room_participants rp ON rp.user_id = u.id
            WHERE rp.room_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_user()).collect())
    }

    /// Idempotent: re-adding an existing participant is a no-op.
    async fn add_participant(&self, room_id: i64, user_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO room_participants (room_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
