//! Callback Page Rendering
//!
//! HTML representation of a completed login, for browsers that did not ask
//! for JSON.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::types::Token;

use super::handlers::UserSection;
use super::json_error;

#[derive(Template)]
#[template(path = "callback.html")]
struct CallbackPage {
    access_token: String,
    refresh_token: String,
    avatar_url: String,
    display_name: String,
    user_error: String,
}

/// Render the callback result page.
pub fn callback_page(token: &Token, user: &UserSection) -> Response {
    let (avatar_url, display_name) = match &user.data {
        Some(profile) => (
            profile.display_field("avatar_url").to_string(),
            profile.display_field("display_name").to_string(),
        ),
        None => (String::new(), String::new()),
    };

    let page = CallbackPage {
        access_token: token.access_token.clone(),
        refresh_token: token.refresh_token.clone(),
        avatar_url,
        display_name,
        user_error: user.error.clone().unwrap_or_default(),
    };

    match page.render() {
        Ok(body) => Html(body).into_response(),
        Err(render_error) => {
            error!(%render_error, "callback page rendering failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "render_failed", None)
        }
    }
}
