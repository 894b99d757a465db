//! Message Handlers
//!
//! The delete-message confirmation flow. Posting happens on the room
//! page itself.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::{MessageError, MessageService, MessageServiceImpl};
use crate::infrastructure::repositories::{PgMessageRepository, PgRoomRepository};
use crate::presentation::http::render::{base_context, render};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn message_service(
    state: &AppState,
) -> MessageServiceImpl<PgMessageRepository, PgRoomRepository> {
    MessageServiceImpl::new(
        Arc::new(PgMessageRepository::new(state.db.clone())),
        Arc::new(PgRoomRepository::new(state.db.clone())),
    )
}

/// Render the delete confirmation page for a message. Author only.
pub async fn delete_message_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(message_id): Path<i64>,
) -> Result<Response, AppError> {
    let message = message_service(&state)
        .get_message(message_id)
        .await
        .map_err(|e| match e {
            MessageError::NotFound => AppError::NotFound("Message not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    if !message.is_authored_by(auth.user_id) {
        return Err(AppError::NotAllowed);
    }

    let mut context = base_context(Some(&auth));
    context.insert("obj", &message.preview());

    Ok(render(&state.templates, "delete.html", &context)?.into_response())
}

/// Delete a message. Author only.
pub async fn delete_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(message_id): Path<i64>,
) -> Result<Response, AppError> {
    message_service(&state)
        .delete_message(message_id, auth.user_id)
        .await
        .map_err(|e| match e {
            MessageError::NotFound => AppError::NotFound("Message not found".into()),
            MessageError::NotAuthor => AppError::NotAllowed,
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Redirect::to("/").into_response())
}
