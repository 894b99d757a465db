//! Room Service
//!
//! Room lifecycle and search, plus the topic listings that accompany
//! every room page.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Room, RoomRepository, RoomSummary, Topic, TopicRepository, User};

/// Room service trait
#[async_trait]
pub trait RoomService: Send + Sync {
    /// Create a room hosted by the acting user. The topic is resolved
    /// by exact name, created when absent.
    async fn create_room(&self, host_id: i64, input: RoomInput) -> Result<Room, RoomError>;

    /// Overwrite a room's topic, name and description. Only the host
    /// may edit; anyone else gets `RoomError::NotHost`.
    async fn update_room(
        &self,
        room_id: i64,
        actor_id: i64,
        input: RoomInput,
    ) -> Result<Room, RoomError>;

    /// Delete a room after the confirmation step. Deletion is not
    /// restricted to the host; any authenticated user may perform it.
    async fn delete_room(&self, room_id: i64) -> Result<(), RoomError>;

    /// Get a room by ID.
    async fn get_room(&self, room_id: i64) -> Result<Room, RoomError>;

    /// Get a room with its topic and host names joined in.
    async fn room_summary(&self, room_id: i64) -> Result<RoomSummary, RoomError>;

    /// Rooms matching `q` across name, description and topic name.
    async fn search(&self, q: &str) -> Result<Vec<RoomSummary>, RoomError>;

    /// Rooms hosted by a user.
    async fn rooms_for_host(&self, user_id: i64) -> Result<Vec<RoomSummary>, RoomError>;

    /// All rooms, default ordering.
    async fn list_rooms(&self) -> Result<Vec<Room>, RoomError>;

    /// Users who have posted in the room.
    async fn participants(&self, room_id: i64) -> Result<Vec<User>, RoomError>;

    /// Topics whose name contains `q`.
    async fn topics_matching(&self, q: &str) -> Result<Vec<Topic>, RoomError>;

    /// The first `limit` topics, for the home page sidebar.
    async fn first_topics(&self, limit: i64) -> Result<Vec<Topic>, RoomError>;
}

/// Validated room input shared by create and update
#[derive(Debug, Clone)]
pub struct RoomInput {
    pub topic: String,
    pub name: String,
    pub description: Option<String>,
}

/// Room service errors
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("Room not found")]
    NotFound,

    #[error("Only the host may edit this room")]
    NotHost,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// RoomService implementation
pub struct RoomServiceImpl<R, T>
where
    R: RoomRepository,
    T: TopicRepository,
{
    room_repo: Arc<R>,
    topic_repo: Arc<T>,
}

impl<R, T> RoomServiceImpl<R, T>
where
    R: RoomRepository,
    T: TopicRepository,
{
    pub fn new(room_repo: Arc<R>, topic_repo: Arc<T>) -> Self {
        Self { room_repo, topic_repo }
    }
}

#[async_trait]
impl<R, T> RoomService for RoomServiceImpl<R, T>
where
    R: RoomRepository + 'static,
    T: TopicRepository + 'static,
{
    async fn create_room(&self, host_id: i64, input: RoomInput) -> Result<Room, RoomError> {
        let topic = self
            .topic_repo
            .get_or_create(&input.topic)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))?;

        self.room_repo
            .create(host_id, topic.id, &input.name, input.description.as_deref())
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))
    }

    async fn update_room(
        &self,
        room_id: i64,
        actor_id: i64,
        input: RoomInput,
    ) -> Result<Room, RoomError> {
        let mut room = self
            .room_repo
            .find_by_id(room_id)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))?
            .ok_or(RoomError::NotFound)?;

        if !room.is_hosted_by(actor_id) {
            return Err(RoomError::NotHost);
        }

        // The topic is re-resolved by name on every edit.
        let topic = self
            .topic_repo
            .get_or_create(&input.topic)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))?;

        room.topic_id = Some(topic.id);
        room.name = input.name;
        room.description = input.description;

        self.room_repo
            .update(&room)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))
    }

    async fn delete_room(&self, room_id: i64) -> Result<(), RoomError> {
        // Existence check first so a missing id reads as 404, not as a
        // silent no-op.
        self.room_repo
            .find_by_id(room_id)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))?
            .ok_or(RoomError::NotFound)?;

        self.room_repo
            .delete(room_id)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))
    }

    async fn get_room(&self, room_id: i64) -> Result<Room, RoomError> {
        self.room_repo
            .find_by_id(room_id)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))?
            .ok_or(RoomError::NotFound)
    }

    async fn room_summary(&self, room_id: i64) -> Result<RoomSummary, RoomError> {
        self.room_repo
            .find_summary(room_id)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))?
            .ok_or(RoomError::NotFound)
    }

    async fn search(&self, q: &str) -> Result<Vec<RoomSummary>, RoomError> {
        self.room_repo
            .search(q)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))
    }

    async fn rooms_for_host(&self, user_id: i64) -> Result<Vec<RoomSummary>, RoomError> {
        self.room_repo
            .find_by_host(user_id)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, RoomError> {
        self.room_repo
            .list_all()
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))
    }

    async fn participants(&self, room_id: i64) -> Result<Vec<User>, RoomError> {
        self.room_repo
            .participants(room_id)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))
    }

    async fn topics_matching(&self, q: &str) -> Result<Vec<Topic>, RoomError> {
        self.topic_repo
            .search(q)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))
    }

    async fn first_topics(&self, limit: i64) -> Result<Vec<Topic>, RoomError> {
        self.topic_repo
            .list_first(limit)
            .await
            .map_err(|e| RoomError::Internal(e.to_string()))
    }
}
