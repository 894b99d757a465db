//! # Parlor
//!
//! A forum-style discussion server: topic-tagged rooms, messages, and
//! a read-only JSON API.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - Template engine
//! - HTTP server

use anyhow::Result;
use tracing::info;

use parlor::config::Settings;
use parlor::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    parlor::telemetry::init_tracing();

    info!("Starting Parlor...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
