//! Topic entity and repository trait.
//!
//! Maps to the `topics` table. Topic names are free text and not
//! unique at the schema level.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A free-text label grouping rooms for browsing and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
}

/// Repository trait for Topic data access operations.
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Find a topic by its exact name. With duplicate names present,
    /// the lowest id wins.
    async fn find_by_name(&self, name: &str) -> Result<Option<Topic>, AppError>;

    /// Insert a new topic; the database assigns the id.
    async fn create(&self, name: &str) -> Result<Topic, AppError>;

    /// Case-insensitive substring search on topic name. An empty query
    /// matches every topic.
    async fn search(&self, q: &str) -> Result<Vec<Topic>, AppError>;

    /// First `limit` topics.
    async fn list_first(&self, limit: i64) -> Result<Vec<Topic>, AppError>;

    /// Exact-name lookup, inserting when absent.
    ///
    /// Two round trips, not atomic: concurrent identical names can
    /// both pass the lookup and insert duplicate rows.
    async fn get_or_create(&self, name: &str) -> Result<Topic, AppError> {
        if let Some(topic) = self.find_by_name(name).await? {
            return Ok(topic);
        }
        self.create(name).await
    }
}
