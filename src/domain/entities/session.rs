//! Session entity and repository trait.
//!
//! Maps to the `sessions` table. A session row backs one login: the
//! browser holds an opaque token in a cookie, the table holds its
//! SHA-256 hash.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A logged-in session.
///
/// Maps to the `sessions` table:
/// - id: UUID PRIMARY KEY
/// - user_id: BIGINT NOT NULL REFERENCES users ON DELETE CASCADE
/// - token_hash: VARCHAR(64) NOT NULL UNIQUE (SHA-256 hex)
/// - expires_at: TIMESTAMPTZ NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: i64,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for a user with the given token hash.
    pub fn new(user_id: i64, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// True while the session has not expired.
    pub fn is_active(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

/// Repository trait for Session data access operations.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session.
    async fn create(&self, session: &Session) -> Result<Session, AppError>;

    /// Find a session by its token hash.
    async fn find_by_token_hash(&self, token_hash: &str)
        -> Result<Option<Session>, AppError>;

    /// Delete the session holding the given token hash. Deleting a
    /// missing session is not an error.
    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<(), AppError>;

    /// Remove expired sessions; returns how many were deleted.
    async fn delete_expired(&self) -> Result<u64, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_session_is_active() {
        let session = Session::new(1, "hash".into(), Utc::now() + Duration::days(14));
        assert!(session.is_active());
    }

    #[test]
    fn test_expired_session_is_not_active() {
        let session = Session::new(1, "hash".into(), Utc::now() - Duration::seconds(1));
        assert!(!session.is_active());
    }

    #[test]
    fn test_token_hash_not_serialized() {
        let session = Session::new(1, "secret-hash".into(), Utc::now() + Duration::days(1));

        let serialized = serde_json::to_string(&session).unwrap();

        assert!(!serialized.contains("secret-hash"));
        assert!(!serialized.contains("token_hash"));
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let expires = Utc::now() + Duration::days(1);
        let a = Session::new(1, "a".into(), expires);
        let b = Session::new(1, "b".into(), expires);

        assert_ne!(a.id, b.id);
    }
}
