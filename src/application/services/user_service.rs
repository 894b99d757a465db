//! User Service
//!
//! Profile lookup and the username/email profile update.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user by ID.
    async fn get_user(&self, user_id: i64) -> Result<User, UserError>;

    /// Update the user's own profile. Only username and email are
    /// editable.
    async fn update_profile(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
    ) -> Result<User, UserError>;
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// UserService implementation
pub struct UserServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn get_user(&self, user_id: i64) -> Result<User, UserError> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)
    }

    async fn update_profile(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
    ) -> Result<User, UserError> {
        self.user_repo
            .update_profile(user_id, username, email)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => UserError::UsernameTaken,
                AppError::NotFound(_) => UserError::NotFound,
                e => UserError::Internal(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    struct FakeUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl FakeUserRepository {
        fn with_user(id: i64, username: &str) -> Self {
            let now = Utc::now();
            Self {
                users: Mutex::new(vec![User {
                    id,
                    username: username.to_string(),
                    email: format!("{}@example.com", username),
                    password_hash: "hash".into(),
                    created_at: now,
                    updated_at: now,
                }]),
            }
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepository {
        async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn create(
            &self,
            _username: &str,
            _email: &str,
            _password_hash: &str,
        ) -> Result<User, AppError> {
            unimplemented!("not exercised by these tests")
        }

        async fn update_profile(
            &self,
            id: i64,
            username: &str,
            email: &str,
        ) -> Result<User, AppError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.id != id && u.username == username) {
                return Err(AppError::Conflict("Username already taken".into()));
            }
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| AppError::NotFound("User not found".into()))?;
            user.username = username.to_string();
            user.email = email.to_string();
            user.updated_at = Utc::now();
            Ok(user.clone())
        }

        async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
            Ok(self.users.lock().unwrap().iter().any(|u| u.username == username))
        }
    }

    #[tokio::test]
    async fn test_update_profile_changes_username_and_email() {
        let users = UserServiceImpl::new(Arc::new(FakeUserRepository::with_user(1, "alice")));

        let updated = users
            .update_profile(1, "alice2", "alice2@example.com")
            .await
            .unwrap();

        assert_eq!(updated.username, "alice2");
        assert_eq!(updated.email, "alice2@example.com");
    }

    #[tokio::test]
    async fn test_update_profile_missing_user() {
        let users = UserServiceImpl::new(Arc::new(FakeUserRepository::with_user(1, "alice")));

        let result = users.update_profile(9, "x", "x@example.com").await;

        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_user_missing() {
        let users = UserServiceImpl::new(Arc::new(FakeUserRepository::with_user(1, "alice")));

        assert!(matches!(users.get_user(9).await, Err(UserError::NotFound)));
    }
}
