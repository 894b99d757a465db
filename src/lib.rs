//! # Parlor Library
//!
//! This crate provides a forum-style discussion server with:
//! - Topic-tagged discussion rooms with host-only editing
//! - Messages with auto-join-on-post participant tracking
//! - Cookie-session authentication against PostgreSQL
//! - Server-rendered pages plus a read-only JSON API
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database implementations
//! - **Presentation Layer**: HTTP handlers, templates, middleware
//!
//! ## Module Structure
//!
//! ```text
//! parlor/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities and repository traits
//! +-- application/   Application services and DTOs
//! +-- infrastructure/ Database pool and repositories
//! +-- presentation/  HTTP routes, handlers, and middleware
//! +-- shared/        Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
