//! User Handlers
//!
//! Public profile pages and the self-service profile update.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

use crate::application::dto::request::UpdateUserForm;
use crate::application::services::{
    MessageService, MessageServiceImpl, RoomService, RoomServiceImpl, UserError,
    UserService, UserServiceImpl,
};
use crate::domain::User;
use crate::infrastructure::repositories::{
    PgMessageRepository, PgRoomRepository, PgTopicRepository, PgUserRepository,
};
use crate::presentation::http::render::{base_context, render};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::first_message;
use crate::startup::AppState;

fn user_service(state: &AppState) -> UserServiceImpl<PgUserRepository> {
    UserServiceImpl::new(Arc::new(PgUserRepository::new(state.db.clone())))
}

fn user_error(e: UserError) -> AppError {
    match e {
        UserError::NotFound => AppError::NotFound("User not found".into()),
        UserError::UsernameTaken => AppError::Conflict("Username already taken".into()),
        UserError::Internal(msg) => AppError::Internal(msg),
    }
}

fn update_user_page_response(
    state: &AppState,
    auth: &AuthUser,
    user: &User,
    error: Option<&str>,
) -> Result<Response, AppError> {
    let mut context = base_context(Some(auth));
    context.insert("user", user);
    context.insert("error", &error);
    Ok(render(&state.templates, "update_user.html", &context)?.into_response())
}

/// A user's public profile: their rooms, their messages, and the topic
/// sidebar.
pub async fn profile(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    let user = user_service(&state)
        .get_user(user_id)
        .await
        .map_err(user_error)?;

    let rooms_service = RoomServiceImpl::new(
        Arc::new(PgRoomRepository::new(state.db.clone())),
        Arc::new(PgTopicRepository::new(state.db.clone())),
    );
    let rooms = rooms_service
        .rooms_for_host(user_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let topics = rooms_service
        .topics_matching("")
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let room_messages = MessageServiceImpl::new(
        Arc::new(PgMessageRepository::new(state.db.clone())),
        Arc::new(PgRoomRepository::new(state.db.clone())),
    )
    .messages_for_user(user_id)
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut context = base_context(auth.as_deref());
    context.insert("user", &user);
    context.insert("rooms", &rooms);
    context.insert("room_messages", &room_messages);
    context.insert("topics", &topics);
    context.insert("room_count", &rooms.len());
    context.insert("topic_count", &topics.len());

    Ok(render(&state.templates, "profile.html", &context)?.into_response())
}

/// Render the profile update form with the current values.
pub async fn update_user_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, AppError> {
    let user = user_service(&state)
        .get_user(auth.user_id)
        .await
        .map_err(user_error)?;

    update_user_page_response(&state, &auth, &user, None)
}

/// Update the current user's username and email.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Form(body): Form<UpdateUserForm>,
) -> Result<Response, AppError> {
    let users = user_service(&state);

    if let Err(errors) = body.validate() {
        let user = users.get_user(auth.user_id).await.map_err(user_error)?;
        return update_user_page_response(&state, &auth, &user, Some(&first_message(&errors)));
    }

    match users
        .update_profile(auth.user_id, &body.username, &body.email)
        .await
    {
        Ok(user) => Ok(Redirect::to(&format!("/profile/{}", user.id)).into_response()),
        Err(UserError::UsernameTaken) => {
            let user = users.get_user(auth.user_id).await.map_err(user_error)?;
            update_user_page_response(&state, &auth, &user, Some("Username already taken"))
        }
        Err(e) => Err(user_error(e)),
    }
}
