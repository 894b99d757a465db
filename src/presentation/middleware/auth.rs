//! Authentication Middleware
//!
//! Session-cookie validation middleware for the HTML routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::application::services::{AuthService, AuthServiceImpl};
use crate::infrastructure::repositories::{PgSessionRepository, PgUserRepository};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

fn auth_service(state: &AppState) -> AuthServiceImpl<PgUserRepository, PgSessionRepository> {
    AuthServiceImpl::new(
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgSessionRepository::new(state.db.clone())),
        state.settings.session.expiry_days,
    )
}

fn session_token(state: &AppState, request: &Request) -> Option<String> {
    let jar = CookieJar::from_headers(request.headers());
    jar.get(&state.settings.session.cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// Authentication middleware that validates the session cookie.
///
/// Requests without a live session are bounced to the login page, the
/// HTML equivalent of a 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = session_token(&state, &request) else {
        return Ok(Redirect::to("/login").into_response());
    };

    let user = auth_service(&state)
        .current_user(&token)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    match user {
        Some(user) => {
            request.extensions_mut().insert(AuthUser {
                user_id: user.id,
                username: user.username,
            });
            Ok(next.run(request).await)
        }
        None => Ok(Redirect::to("/login").into_response()),
    }
}

/// Optional authentication middleware (doesn't redirect without a
/// session). Public pages use this to know who is browsing; the room
/// POST path deliberately relies on it instead of a hard auth check.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = session_token(&state, &request) {
        if let Ok(Some(user)) = auth_service(&state).current_user(&token).await {
            request.extensions_mut().insert(AuthUser {
                user_id: user.id,
                username: user.username,
            });
        }
    }

    next.run(request).await
}
