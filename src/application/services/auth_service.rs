//! Authentication Service
//!
//! Handles registration, login, and cookie-backed session handling.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

use crate::domain::{Session, SessionRepository, User, UserRepository};

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user. The username is lowercased before saving
    /// and the new user is logged straight in.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, SessionToken), AuthError>;

    /// Authenticate with username and password, starting a session on
    /// success. Unknown usernames and wrong passwords fail identically.
    async fn login(&self, username: &str, password: &str)
        -> Result<(User, SessionToken), AuthError>;

    /// End the session behind the given token. A token without a
    /// session is not an error.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Resolve a session token to its user, if the session exists and
    /// has not expired.
    async fn current_user(&self, token: &str) -> Result<Option<User>, AuthError>;
}

/// Opaque session token handed to the browser as a cookie value.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// AuthService implementation
pub struct AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    session_expiry_days: i64,
}

impl<U, S> AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Create a new AuthServiceImpl
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, session_expiry_days: i64) -> Self {
        Self {
            user_repo,
            session_repo,
            session_expiry_days,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a session token for storage
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Open a session for the user and mint its opaque cookie token.
    /// The token itself never touches the database; only its hash does.
    async fn start_session(&self, user_id: i64) -> Result<SessionToken, AuthError> {
        let token = format!("{}.{}", uuid::Uuid::new_v4(), uuid::Uuid::new_v4());
        let expires_at = Utc::now() + Duration::days(self.session_expiry_days);

        let session = Session::new(user_id, Self::hash_token(&token), expires_at);
        self.session_repo
            .create(&session)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(SessionToken { token, expires_at })
    }
}

#[async_trait]
impl<U, S> AuthService for AuthServiceImpl<U, S>
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, SessionToken), AuthError> {
        let username = username.to_lowercase();

        if self
            .user_repo
            .username_exists(&username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
        {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = self.hash_password(password)?;

        let user = self
            .user_repo
            .create(&username, email, &password_hash)
            .await
            .map_err(|e| match e {
                crate::shared::error::AppError::Conflict(_) => AuthError::UsernameTaken,
                e => AuthError::Internal(e.to_string()),
            })?;

        let token = self.start_session(user.id).await?;

        Ok((user, token))
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, SessionToken), AuthError> {
        let username = username.to_lowercase();

        let user = self
            .user_repo
            .find_by_username(&username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.start_session(user.id).await?;

        Ok((user, token))
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.session_repo
            .delete_by_token_hash(&Self::hash_token(token))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn current_user(&self, token: &str) -> Result<Option<User>, AuthError> {
        let session = match self
            .session_repo
            .find_by_token_hash(&Self::hash_token(token))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
        {
            Some(session) if session.is_active() => session,
            _ => return Ok(None),
        };

        self.user_repo
            .find_by_id(session.user_id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::AppError;
    use std::sync::Mutex;

    struct FakeUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl FakeUserRepository {
        fn new() -> Self {
            Self { users: Mutex::new(Vec::new()) }
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
            username: &str,
            email: &str,
            password_hash: &str,
        ) -> Result<User, AppError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == username) {
                return Err(AppError::Conflict("Username already taken".into()));
            }
            let now = Utc::now();
            let user = User {
                id: users.len() as i64 + 1,
                username: username.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: now,
                updated_at: now,
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn update_profile(
            &self,
            id: i64,
            username: &str,
            email: &str,
        ) -> Result<User, AppError> {
            let mut users = self.users.lock().unwrap();
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

    struct FakeSessionRepository {
        sessions: Mutex<Vec<Session>>,
    }

    impl FakeSessionRepository {
        fn new() -> Self {
            Self { sessions: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl SessionRepository for FakeSessionRepository {
        async fn create(&self, session: &Session) -> Result<Session, AppError> {
            self.sessions.lock().unwrap().push(session.clone());
            Ok(session.clone())
        }

        async fn find_by_token_hash(
            &self,
            token_hash: &str,
        ) -> Result<Option<Session>, AppError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.token_hash == token_hash)
                .cloned())
        }

        async fn delete_by_token_hash(&self, token_hash: &str) -> Result<(), AppError> {
            self.sessions.lock().unwrap().retain(|s| s.token_hash != token_hash);
            Ok(())
        }

        async fn delete_expired(&self) -> Result<u64, AppError> {
            let mut sessions = self.sessions.lock().unwrap();
            let before = sessions.len();
            sessions.retain(|s| s.is_active());
            Ok((before - sessions.len()) as u64)
        }
    }

    fn service() -> AuthServiceImpl<FakeUserRepository, FakeSessionRepository> {
        AuthServiceImpl::new(
            Arc::new(FakeUserRepository::new()),
            Arc::new(FakeSessionRepository::new()),
            14,
        )
    }

    #[tokio::test]
    async fn test_register_lowercases_username() {
        let auth = service();

        let (user, _) = auth
            .register("Alice", "alice@example.com", "password123")
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let auth = service();
        auth.register("alice", "a@example.com", "password123").await.unwrap();

        let result = auth.register("Alice", "b@example.com", "password123").await;

        assert!(matches!(result, Err(AuthError::UsernameTaken)));
    }

    #[tokio::test]
    async fn test_register_logs_the_user_in() {
        let auth = service();

        let (user, token) = auth
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        let current = auth.current_user(&token.token).await.unwrap();
        assert_eq!(current.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let auth = service();
        auth.register("alice", "alice@example.com", "password123").await.unwrap();

        let (user, token) = auth.login("alice", "password123").await.unwrap();

        assert_eq!(user.username, "alice");
        assert!(token.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_login_lowercases_username() {
        let auth = service();
        auth.register("alice", "alice@example.com", "password123").await.unwrap();

        assert!(auth.login("ALICE", "password123").await.is_ok());
    }

    #[tokio::test]
    async fn test_login_failure_does_not_distinguish_cause() {
        let auth = service();
        auth.register("alice", "alice@example.com", "password123").await.unwrap();

        // Unknown user and wrong password must be indistinguishable.
        let unknown = auth.login("nobody", "password123").await;
        let wrong = auth.login("alice", "wrong-password").await;

        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let auth = service();
        let (_, token) = auth
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        auth.logout(&token.token).await.unwrap();

        assert!(auth.current_user(&token.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_without_session_is_ok() {
        let auth = service();
        assert!(auth.logout("no-such-token").await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_session_yields_no_user() {
        let user_repo = Arc::new(FakeUserRepository::new());
        let session_repo = Arc::new(FakeSessionRepository::new());
        let auth = AuthServiceImpl::new(user_repo.clone(), session_repo.clone(), 14);

        let user = user_repo.create("alice", "a@example.com", "x").await.unwrap();
        let token = "expired-token";
        let hash = AuthServiceImpl::<FakeUserRepository, FakeSessionRepository>::hash_token(token);
        session_repo
            .create(&Session::new(user.id, hash, Utc::now() - Duration::seconds(1)))
            .await
            .unwrap();

        assert!(auth.current_user(token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stored_hash_is_not_the_token() {
        let auth = service();
        let (_, token) = auth
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        let sessions = auth.session_repo.sessions.lock().unwrap();
        assert_eq!(sessions.len(), 1);
        assert_ne!(sessions[0].token_hash, token.token);
        // SHA-256 hex digest
        assert_eq!(sessions[0].token_hash.len(), 64);
    }
}
