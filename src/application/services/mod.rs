//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, cookie sessions
//! - **UserService**: Profile lookup and updates
//! - **RoomService**: Room lifecycle, search, topic listings
//! - **MessageService**: Posting, deletion, message feeds

pub mod auth_service;
pub mod message_service;
pub mod room_service;
pub mod user_service;

// Re-export auth service types
pub use auth_service::{AuthError, AuthService, AuthServiceImpl, SessionToken};

// Re-export room service types
pub use room_service::{RoomError, RoomInput, RoomService, RoomServiceImpl};

// Re-export message service types
pub use message_service::{MessageError, MessageService, MessageServiceImpl};

// Re-export user service types
pub use user_service::{UserError, UserService, UserServiceImpl};
