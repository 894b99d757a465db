//! Message Repository Implementation
//!
//! PostgreSQL implementation of the MessageRepository trait, including
//! the topic-scoped recent feed used on the home page.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::contains_pattern;
use crate::domain::{Message, MessageRepository, MessageSummary};
use crate::shared::error::AppError;

/// Internal row type matching the messages table schema.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    room_id: i64,
    user_id: i64,
    body: String,
    updated_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            room_id: self.room_id,
            user_id: self.user_id,
            body: self.body,
            updated_at: self.updated_at,
            created_at: self.created_at,
        }
    }
}

/// Internal row type for feed queries with author and room joined in.
#[derive(Debug, sqlx::FromRow)]
struct MessageSummaryRow {
    id: i64,
    room_id: i64,
    room_name: String,
    user_id: i64,
    username: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl MessageSummaryRow {
    fn into_summary(self) -> MessageSummary {
        MessageSummary {
            id: self.id,
            room_id: self.room_id,
            room_name: self.room_name,
            user_id: self.user_id,
            username: self.username,
            body: self.body,
            created_at: self.created_at,
        }
    }
}

const SUMMARY_SELECT: &str = r#"
    SELECT m.id, m.room_id, r.name AS room_name,
           m.user_id, u.username, m.body, m.created_at
    FROM messages m
    JOIN rooms r ON r.id = m.room_id
    JOIN users u ON u.id = m.user_id
"#;

/// PostgreSQL message repository implementation.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, room_id, user_id, body, updated_at, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_message()))
    }

    /// `user_id` is bound as-is. A None (anonymous poster) hits the
    /// NOT NULL constraint and the insert fails with a database error.
    async fn create(
        &self,
        room_id: i64,
        user_id: Option<i64>,
        body: &str,
    ) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (room_id, user_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, room_id, user_id, body, updated_at, created_at
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_message())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message with id {} not found", id)));
        }

        Ok(())
    }

    async fn find_by_room(&self, room_id: i64) -> Result<Vec<MessageSummary>, AppError> {
        let rows = sqlx::query_as::<_, MessageSummaryRow>(&format!(
            r#"
            {SUMMARY_SELECT}
            WHERE m.room_id = $1
            ORDER BY m.updated_at DESC, m.created_at DESC
            "#
        ))
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<MessageSummary>, AppError> {
        let rows = sqlx::query_as::<_, MessageSummaryRow>(&format!(
            r#"
            {SUMMARY_SELECT}
            WHERE m.user_id = $1
            ORDER BY m.updated_at DESC, m.created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    /// Messages whose room's topic name contains `q`. Rooms without a
    /// topic never match, mirroring the room search's topic leg.
    async fn recent_by_topic(
        &self,
        q: &str,
        limit: i64,
    ) -> Result<Vec<MessageSummary>, AppError> {
        let rows = sqlx::query_as::<_, MessageSummaryRow>(&format!(
            r#"
            {SUMMARY_SELECT}
            JOIN topics t ON t.id = r.topic_id
            WHERE t.name ILIKE $1
            ORDER BY m.created_at DESC
            LIMIT $2
            "#
        ))
        .bind(contains_pattern(q))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    async fn list_recent(&self) -> Result<Vec<MessageSummary>, AppError> {
        let rows = sqlx::query_as::<_, MessageSummaryRow>(&format!(
            r#"
            {SUMMARY_SELECT}
            ORDER BY m.created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }
}
