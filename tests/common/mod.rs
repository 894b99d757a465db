//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use sqlx::postgres::PgPoolOptions;
use tera::Tera;
use tower::ServiceExt;

use parlor::config::{
    CorsSettings, DatabaseSettings, ServerSettings, SessionSettings, Settings,
    TemplateSettings,
};
use parlor::presentation::http::routes;
use parlor::startup::AppState;

/// Settings for tests. The database pool is created lazily, so routes
/// that never touch the database work without a running Postgres.
fn test_settings() -> Settings {
    Settings {
        server: ServerSettings { host: "127.0.0.1".into(), port: 0 },
        database: DatabaseSettings {
            url: std::env::var("TEST_DATABASE_URL")
                .unwrap_or_else(|_| "postgres://postgres@127.0.0.1:1/parlor_test".into()),
            max_connections: 2,
            min_connections: 0,
            acquire_timeout: 1,
        },
        session: SessionSettings {
            cookie_name: "parlor_session".into(),
            expiry_days: 14,
        },
        templates: TemplateSettings {
            dir: format!("{}/templates", env!("CARGO_MANIFEST_DIR")),
        },
        cors: CorsSettings { allowed_origins: vec![] },
        environment: "test".into(),
    }
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application over the real router.
    pub fn new() -> Self {
        let settings = test_settings();

        let db = PgPoolOptions::new()
            .max_connections(settings.database.max_connections)
            .connect_lazy(&settings.database.url)
            .expect("lazy pool creation cannot fail on a well-formed URL");

        let templates =
            Arc::new(Tera::new(&settings.templates.glob()).expect("templates load"));

        let state = AppState {
            db,
            templates,
            settings: Arc::new(settings),
        };

        Self { router: routes::create_router(state) }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with a urlencoded form body
    pub async fn post_form(&self, uri: &str, body: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Read a response body to a string
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
