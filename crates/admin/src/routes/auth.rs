//! Login page and logout handlers.
//!
//! Credential verification is the external auth collaborator's job; this
//! module only renders the login view and tears the session down again.

use askama::Template;
use axum::response::{Html, Redirect};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::clear_current_admin;

use super::render;

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {}

/// Login page handler (public).
pub async fn login_page() -> Result<Html<String>> {
    render(&LoginTemplate {})
}

/// Logout handler: clear the admin principal and return to the login page.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session teardown: {e}")))?;

    Ok(Redirect::to("/admin/login"))
}
