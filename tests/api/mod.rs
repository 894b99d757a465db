//! HTTP Endpoint Tests

mod api_tests;
mod auth_tests;
mod health_tests;
mod pages_tests;
