//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! This module provides concrete implementations of the repository
//! traits defined in the domain layer. Each repository handles data
//! access for a specific entity type.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - User account management
//! - **TopicRepository** - Topic lookup and get-or-create
//! - **RoomRepository** - Room CRUD, search, and participants
//! - **MessageRepository** - Message CRUD and topic-scoped feeds
//! - **SessionRepository** - Cookie-backed login sessions

pub mod message_repository;
pub mod room_repository;
pub mod session_repository;
pub mod topic_repository;
pub mod user_repository;

pub use message_repository::PgMessageRepository;
pub use room_repository::PgRoomRepository;
pub use session_repository::PgSessionRepository;
pub use topic_repository::PgTopicRepository;
pub use user_repository::PgUserRepository;

/// Build an ILIKE pattern that matches rows containing `q`.
///
/// `%`, `_` and `\` in the query are escaped so they match literally
/// instead of acting as wildcards. An empty query yields `%%`, which
/// matches every non-null value.
pub(crate) fn contains_pattern(q: &str) -> String {
    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", "%%" ; "empty query matches everything")]
    #[test_case("python", "%python%" ; "plain text passes through")]
    #[test_case("100%", "%100\\%%" ; "percent is escaped")]
    #[test_case("snake_case", "%snake\\_case%" ; "underscore is escaped")]
    #[test_case("a\\b", "%a\\\\b%" ; "backslash is escaped")]
    fn test_contains_pattern(q: &str, expected: &str) {
        assert_eq!(contains_pattern(q), expected);
    }
}
