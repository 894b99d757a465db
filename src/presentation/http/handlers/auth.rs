//! Authentication Handlers
//!
//! Login, logout and registration pages.

use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::application::dto::request::{LoginForm, RegisterForm};
use crate::application::services::{AuthError, AuthService, AuthServiceImpl};
use crate::infrastructure::repositories::{PgSessionRepository, PgUserRepository};
use crate::presentation::http::render::{base_context, render};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::first_message;
use crate::startup::AppState;

fn auth_service(state: &AppState) -> AuthServiceImpl<PgUserRepository, PgSessionRepository> {
    AuthServiceImpl::new(
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgSessionRepository::new(state.db.clone())),
        state.settings.session.expiry_days,
    )
}

fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_owned(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn login_register_page(
    state: &AppState,
    page: &str,
    error: Option<&str>,
) -> Result<Response, AppError> {
    let mut context = base_context(None);
    context.insert("page", page);
    context.insert("error", &error);
    Ok(render(&state.templates, "login_register.html", &context)?.into_response())
}

/// Render the login form. Logged-in users are bounced home.
pub async fn login_page(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Response, AppError> {
    if auth.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    login_register_page(&state, "login", None)
}

/// Log a user in. The username is lowercased before lookup; bad
/// credentials re-render the form with a single message that does not
/// say whether the user exists.
pub async fn login(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    jar: CookieJar,
    Form(body): Form<LoginForm>,
) -> Result<Response, AppError> {
    if auth.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    if body.validate().is_err() {
        return login_register_page(&state, "login", Some("Username or password does not exist"));
    }

    match auth_service(&state).login(&body.username, &body.password).await {
        Ok((_, token)) => {
            let cookie = session_cookie(&state.settings.session.cookie_name, token.token);
            Ok((jar.add(cookie), Redirect::to("/")).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            login_register_page(&state, "login", Some("Username or password does not exist"))
        }
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

/// End the session and return to the login page.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let cookie_name = state.settings.session.cookie_name.clone();

    if let Some(cookie) = jar.get(&cookie_name) {
        let token = cookie.value().to_string();
        auth_service(&state)
            .logout(&token)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    let removal = Cookie::build((cookie_name, "")).path("/").build();
    Ok((jar.remove(removal), Redirect::to("/login")).into_response())
}

/// Render the registration form.
pub async fn register_page(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Response, AppError> {
    if auth.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    login_register_page(&state, "register", None)
}

/// Register a new user and log them straight in.
pub async fn register(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    jar: CookieJar,
    Form(body): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if auth.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    if let Err(errors) = body.validate() {
        return login_register_page(&state, "register", Some(&first_message(&errors)));
    }

    match auth_service(&state)
        .register(&body.username, &body.email, &body.password)
        .await
    {
        Ok((_, token)) => {
            let cookie = session_cookie(&state.settings.session.cookie_name, token.token);
            Ok((jar.add(cookie), Redirect::to("/")).into_response())
        }
        Err(AuthError::UsernameTaken) => {
            login_register_page(&state, "register", Some("An error occurred during registration"))
        }
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}
