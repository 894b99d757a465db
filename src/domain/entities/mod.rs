//! # Domain Entities
//!
//! Core domain entities representing the main business objects.
//! All entities map directly to their corresponding database tables.
//!
//! ## Core Entities
//!
//! - **User**: Account with authentication data
//! - **Topic**: Free-text label grouping rooms
//! - **Room**: A discussion room hosted by a user, tagged with a topic
//! - **Message**: A text message posted in a room
//!
//! ## Supporting Entities
//!
//! - **Session**: Server-side login sessions backing the cookie auth
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure
//! layer, following the dependency inversion principle.

mod message;
mod room;
mod session;
mod topic;
mod user;

// Re-export User entity and related types
pub use user::{User, UserRepository};

// Re-export Topic entity and related types
pub use topic::{Topic, TopicRepository};

// Re-export Room entity and related types
pub use room::{Room, RoomRepository, RoomSummary};

// Re-export Message entity and related types
pub use message::{Message, MessageRepository, MessageSummary};

// Re-export Session entity and related types
pub use session::{Session, SessionRepository};
