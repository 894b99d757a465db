//! Data Transfer Objects
//!
//! Validated form inputs and API response bodies.

pub mod request;
pub mod response;

pub use request::{
    LoginForm, MessageForm, RegisterForm, RoomForm, SearchQuery, UpdateUserForm,
};
pub use response::RoomResponse;
