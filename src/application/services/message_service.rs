//! Message Service
//!
//! Posting and deleting messages, plus the message feeds used by the
//! home, profile and activity pages.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Message, MessageRepository, MessageSummary, RoomRepository};

/// How many topic-matching messages the home page feed shows.
const RECENT_FEED_LIMIT: i64 = 5;

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Post a message in a room. The poster joins the room's
    /// participant set as a side effect; re-posting is a no-op on the
    /// set. No authentication is enforced here: a missing `user_id` is
    /// bound as NULL and fails at the persistence layer.
    async fn post_message(
        &self,
        room_id: i64,
        user_id: Option<i64>,
        body: &str,
    ) -> Result<Message, MessageError>;

    /// Delete a message. Only its author may do so.
    async fn delete_message(&self, message_id: i64, actor_id: i64)
        -> Result<(), MessageError>;

    /// Get a message by ID (the delete confirmation page).
    async fn get_message(&self, message_id: i64) -> Result<Message, MessageError>;

    /// Messages in a room, most recently updated first.
    async fn messages_in_room(&self, room_id: i64)
        -> Result<Vec<MessageSummary>, MessageError>;

    /// Messages authored by a user.
    async fn messages_for_user(&self, user_id: i64)
        -> Result<Vec<MessageSummary>, MessageError>;

    /// The 5 newest messages whose room topic matches `q`.
    async fn recent_for_topic(&self, q: &str) -> Result<Vec<MessageSummary>, MessageError>;

    /// Every message, newest first.
    async fn activity(&self) -> Result<Vec<MessageSummary>, MessageError>;
}

/// Message service errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Message not found")]
    NotFound,

    #[error("Only the author may delete this message")]
    NotAuthor,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// MessageService implementation
pub struct MessageServiceImpl<M, R>
where
    M: MessageRepository,
    R: RoomRepository,
{
    message_repo: Arc<M>,
    room_repo: Arc<R>,
}

impl<M, R> MessageServiceImpl<M, R>
where
    M: MessageRepository,
    R: RoomRepository,
{
    pub fn new(message_repo: Arc<M>, room_repo: Arc<R>) -> Self {
        Self { message_repo, room_repo }
    }
}

#[async_trait]
impl<M, R> MessageService for MessageServiceImpl<M, R>
where
    M: MessageRepository + 'static,
    R: RoomRepository + 'static,
{
    async fn post_message(
        &self,
        room_id: i64,
        user_id: Option<i64>,
        body: &str,
    ) -> Result<Message, MessageError> {
        self.room_repo
            .find_by_id(room_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::RoomNotFound)?;

        let message = self
            .message_repo
            .create(room_id, user_id, body)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        // Auto-join on post. Idempotent; the set never shrinks here.
        self.room_repo
            .add_participant(room_id, message.user_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        Ok(message)
    }

    async fn delete_message(
        &self,
        message_id: i64,
        actor_id: i64,
    ) -> Result<(), MessageError> {
        let message = self
            .message_repo
            .find_by_id(message_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::NotFound)?;

        if !message.is_authored_by(actor_id) {
            return Err(MessageError::NotAuthor);
        }

        self.message_repo
            .delete(message_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    async fn get_message(&self, message_id: i64) -> Result<Message, MessageError> {
        self.message_repo
            .find_by_id(message_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::NotFound)
    }

    async fn messages_in_room(
        &self,
        room_id: i64,
    ) -> Result<Vec<MessageSummary>, MessageError> {
        self.message_repo
            .find_by_room(room_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    async fn messages_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<MessageSummary>, MessageError> {
        self.message_repo
            .find_by_user(user_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    async fn recent_for_topic(&self, q: &str) -> Result<Vec<MessageSummary>, MessageError> {
        self.message_repo
            .recent_by_topic(q, RECENT_FEED_LIMIT)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    async fn activity(&self) -> Result<Vec<MessageSummary>, MessageError> {
        self.message_repo
            .list_recent()
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }
}
