//! Route Configuration
//!
//! Configures all HTML and JSON routes.

use axum::{middleware, routing::get, Router};

use super::handlers;
use crate::presentation::middleware::{auth_middleware, optional_auth_middleware};
use crate::startup::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(page_routes(state.clone()))
        .merge(protected_routes(state.clone()))
        .nest("/api", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// Public pages. The optional auth layer resolves the session cookie
/// so pages know who is browsing, but never blocks the request.
fn page_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::home))
        .route(
            "/room/{room_id}",
            get(handlers::room::room_page).post(handlers::room::post_message),
        )
        .route("/profile/{user_id}", get(handlers::user::profile))
        .route("/topics", get(handlers::home::topics_page))
        .route("/activity", get(handlers::home::activity_page))
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route(
            "/register",
            get(handlers::auth::register_page).post(handlers::auth::register),
        )
        .route("/logout", get(handlers::auth::logout))
        .route_layer(middleware::from_fn_with_state(state, optional_auth_middleware))
}

/// Mutation routes behind the login wall. Unauthenticated requests are
/// redirected to the login page.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/create-room",
            get(handlers::room::create_room_page).post(handlers::room::create_room),
        )
        .route(
            "/update-room/{room_id}",
            get(handlers::room::update_room_page).post(handlers::room::update_room),
        )
        .route(
            "/delete-room/{room_id}",
            get(handlers::room::delete_room_page).post(handlers::room::delete_room),
        )
        .route(
            "/delete-message/{message_id}",
            get(handlers::message::delete_message_page).post(handlers::message::delete_message),
        )
        .route(
            "/update-user",
            get(handlers::user::update_user_page).post(handlers::user::update_user),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Read-only JSON API routes (unauthenticated)
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::api::get_routes))
        .route("/rooms/", get(handlers::api::get_rooms))
        .route("/rooms/{room_id}", get(handlers::api::get_room))
}
