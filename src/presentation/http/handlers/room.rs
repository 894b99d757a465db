//! Room Handlers
//!
//! The room page with its inline message form, plus the create,
//! update and delete-room flows.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

use crate::application::dto::request::{MessageForm, RoomForm};
use crate::application::services::{
    MessageError, MessageService, MessageServiceImpl, RoomError, RoomInput, RoomService,
    RoomServiceImpl,
};
use crate::domain::RoomSummary;
use crate::infrastructure::repositories::{
    PgMessageRepository, PgRoomRepository, PgTopicRepository,
};
use crate::presentation::http::render::{base_context, render};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::first_message;
use crate::startup::AppState;

fn room_service(state: &AppState) -> RoomServiceImpl<PgRoomRepository, PgTopicRepository> {
    RoomServiceImpl::new(
        Arc::new(PgRoomRepository::new(state.db.clone())),
        Arc::new(PgTopicRepository::new(state.db.clone())),
    )
}

fn message_service(
    state: &AppState,
) -> MessageServiceImpl<PgMessageRepository, PgRoomRepository> {
    MessageServiceImpl::new(
        Arc::new(PgMessageRepository::new(state.db.clone())),
        Arc::new(PgRoomRepository::new(state.db.clone())),
    )
}

/// The shared room form page, pre-populated when editing.
async fn room_form_page(
    state: &AppState,
    auth: &AuthUser,
    room: Option<&RoomSummary>,
    error: Option<&str>,
) -> Result<Response, AppError> {
    let topics = room_service(state)
        .topics_matching("")
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut context = base_context(Some(auth));
    context.insert("topics", &topics);
    context.insert("room", &room);
    context.insert("error", &error);

    Ok(render(&state.templates, "room_form.html", &context)?.into_response())
}

/// Room page: the room, its messages, and its participants.
pub async fn room_page(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(room_id): Path<i64>,
) -> Result<Response, AppError> {
    let rooms = room_service(&state);
    let room = rooms.room_summary(room_id).await.map_err(|e| match e {
        RoomError::NotFound => AppError::NotFound("Room not found".into()),
        e => AppError::Internal(e.to_string()),
    })?;
    let participants = rooms
        .participants(room_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let room_messages = message_service(&state)
        .messages_in_room(room_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut context = base_context(auth.as_deref());
    context.insert("room", &room);
    context.insert("room_messages", &room_messages);
    context.insert("participants", &participants);

    Ok(render(&state.templates, "room.html", &context)?.into_response())
}

/// Post a message into the room and bounce back to it. There is no
/// auth gate here; an anonymous post fails the NOT NULL constraint on
/// the message's user reference instead.
pub async fn post_message(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(room_id): Path<i64>,
    Form(body): Form<MessageForm>,
) -> Result<Response, AppError> {
    if body.validate().is_err() {
        return Ok(Redirect::to(&format!("/room/{}", room_id)).into_response());
    }

    message_service(&state)
        .post_message(room_id, auth.map(|Extension(a)| a.user_id), &body.body)
        .await
        .map_err(|e| match e {
            MessageError::RoomNotFound => AppError::NotFound("Room not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Redirect::to(&format!("/room/{}", room_id)).into_response())
}

/// Render the empty room form.
pub async fn create_room_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, AppError> {
    room_form_page(&state, &auth, None, None).await
}

/// Create a room hosted by the current user.
pub async fn create_room(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Form(body): Form<RoomForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = body.validate() {
        return room_form_page(&state, &auth, None, Some(&first_message(&errors))).await;
    }

    room_service(&state)
        .create_room(
            auth.user_id,
            RoomInput {
                topic: body.topic,
                name: body.name,
                description: body.description,
            },
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Redirect::to("/").into_response())
}

/// Render the room form pre-populated for editing. Host only.
pub async fn update_room_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(room_id): Path<i64>,
) -> Result<Response, AppError> {
    let rooms = room_service(&state);
    let room = rooms.get_room(room_id).await.map_err(|e| match e {
        RoomError::NotFound => AppError::NotFound("Room not found".into()),
        e => AppError::Internal(e.to_string()),
    })?;

    if !room.is_hosted_by(auth.user_id) {
        return Err(AppError::NotAllowed);
    }

    let summary = rooms.room_summary(room_id).await.map_err(|e| match e {
        RoomError::NotFound => AppError::NotFound("Room not found".into()),
        e => AppError::Internal(e.to_string()),
    })?;

    room_form_page(&state, &auth, Some(&summary), None).await
}

/// Overwrite a room's topic, name and description. Host only.
pub async fn update_room(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(room_id): Path<i64>,
    Form(body): Form<RoomForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = body.validate() {
        let rooms = room_service(&state);
        let room = rooms.get_room(room_id).await.map_err(|e| match e {
            RoomError::NotFound => AppError::NotFound("Room not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;
        if !room.is_hosted_by(auth.user_id) {
            return Err(AppError::NotAllowed);
        }
        let summary = rooms.room_summary(room_id).await.map_err(|e| match e {
            RoomError::NotFound => AppError::NotFound("Room not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;
        return room_form_page(&state, &auth, Some(&summary), Some(&first_message(&errors)))
            .await;
    }

    room_service(&state)
        .update_room(
            room_id,
            auth.user_id,
            RoomInput {
                topic: body.topic,
                name: body.name,
                description: body.description,
            },
        )
        .await
        .map_err(|e| match e {
            RoomError::NotFound => AppError::NotFound("Room not found".into()),
            RoomError::NotHost => AppError::NotAllowed,
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Redirect::to("/").into_response())
}

/// Render the delete confirmation page for a room.
pub async fn delete_room_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(room_id): Path<i64>,
) -> Result<Response, AppError> {
    let room = room_service(&state)
        .room_summary(room_id)
        .await
        .map_err(|e| match e {
            RoomError::NotFound => AppError::NotFound("Room not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    let mut context = base_context(Some(&auth));
    context.insert("obj", &room.name);

    Ok(render(&state.templates, "delete.html", &context)?.into_response())
}

/// Delete a room and everything in it. Any authenticated user may do
/// this; only the confirmation POST reaches here.
pub async fn delete_room(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthUser>,
    Path(room_id): Path<i64>,
) -> Result<Response, AppError> {
    room_service(&state)
        .delete_room(room_id)
        .await
        .map_err(|e| match e {
            RoomError::NotFound => AppError::NotFound("Room not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Redirect::to("/").into_response())
}
