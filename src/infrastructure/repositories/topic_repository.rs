//! Topic Repository Implementation
//!
//! PostgreSQL implementation of the TopicRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use super::contains_pattern;
use crate::domain::{Topic, TopicRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct TopicRow {
    id: i64,
    name: String,
}

impl TopicRow {
    fn into_topic(self) -> Topic {
        Topic { id: self.id, name: self.name }
    }
}

/// PostgreSQL topic repository implementation.
#[derive(Clone)]
pub struct PgTopicRepository {
    pool: PgPool,
}

impl PgTopicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for PgTopicRepository {
    /// Exact-name lookup. Names are not unique, so the lowest id wins
    /// when duplicates exist.
    async fn find_by_name(&self, name: &str) -> Result<Option<Topic>, AppError> {
        let row = sqlx::query_as::<_, TopicRow>(
            r#"
            SELECT id, name
            FROM topics
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_topic()))
    }

    async fn create(&self, name: &str) -> Result<Topic, AppError> {
        let row = sqlx::query_as::<_, TopicRow>(
            r#"
            INSERT INTO topics (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_topic())
    }

    async fn search(&self, q: &str) -> Result<Vec<Topic>, AppError> {
        let rows = sqlx::query_as::<_, TopicRow>(
            r#"
            SELECT id, name
            FROM topics
            WHERE name ILIKE $1
            ORDER BY id
            "#,
        )
        .bind(contains_pattern(q))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_topic()).collect())
    }

    async fn list_first(&self, limit: i64) -> Result<Vec<Topic>, AppError> {
        let rows = sqlx::query_as::<_, TopicRow>(
            r#"
            SELECT id, name
            FROM topics
            ORDER BY id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_topic()).collect())
    }
}
