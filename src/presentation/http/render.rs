//! Template Rendering Helpers

use axum::response::Html;
use tera::{Context, Tera};

use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;

/// Render a template to an HTML response.
pub fn render(templates: &Tera, name: &str, context: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(templates.render(name, context)?))
}

/// Context pre-seeded with the browsing user, which every page's
/// navigation displays.
pub fn base_context(auth: Option<&AuthUser>) -> Context {
    let mut context = Context::new();
    context.insert("auth_user", &auth);
    context
}
