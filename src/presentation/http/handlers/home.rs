//! Home, Topics and Activity Pages

use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    response::{IntoResponse, Response},
};

use crate::application::dto::request::SearchQuery;
use crate::application::services::{
    MessageService, MessageServiceImpl, RoomService, RoomServiceImpl,
};
use crate::infrastructure::repositories::{
    PgMessageRepository, PgRoomRepository, PgTopicRepository,
};
use crate::presentation::http::render::{base_context, render};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// How many topics the home page sidebar lists.
const HOME_TOPIC_LIMIT: i64 = 5;

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

/// Home page: rooms matching `q`, the first topics, and the newest
/// messages whose room topic matches the same `q`.
pub async fn home(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let q = params.q();

    let rooms_service = room_service(&state);
    let rooms = rooms_service
        .search(q)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let topics = rooms_service
        .first_topics(HOME_TOPIC_LIMIT)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let room_messages = message_service(&state)
        .recent_for_topic(q)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut context = base_context(auth.as_deref());
    context.insert("q", q);
    context.insert("room_count", &rooms.len());
    context.insert("topic_count", &topics.len());
    context.insert("rooms", &rooms);
    context.insert("topics", &topics);
    context.insert("room_messages", &room_messages);

    Ok(render(&state.templates, "home.html", &context)?.into_response())
}

/// Topic listing, filterable by the same substring rule on name alone.
pub async fn topics_page(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let topics = room_service(&state)
        .topics_matching(params.q())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut context = base_context(auth.as_deref());
    context.insert("topics", &topics);

    Ok(render(&state.templates, "topics.html", &context)?.into_response())
}

/// Sitewide activity feed: every message, newest first.
pub async fn activity_page(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Response, AppError> {
    let room_messages = message_service(&state)
        .activity()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut context = base_context(auth.as_deref());
    context.insert("room_messages", &room_messages);

    Ok(render(&state.templates, "activity.html", &context)?.into_response())
}
