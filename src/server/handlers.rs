//! Auth Handlers
//!
//! `/auth/login` and `/auth/callback`: query extraction, flow invocation, and
//! outcome-to-HTTP mapping.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::types::{Token, UserProfile};

use super::{json_error, render, AppState};

/// Profile fields requested after a successful exchange.
pub const USER_INFO_FIELDS: &[&str] = &["open_id", "display_name", "avatar_url"];

/// Callback query parameters.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Successful callback payload.
#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub token: Token,
    pub user: UserSection,
}

/// Profile section of the callback payload: a document or an error, so the
/// caller can distinguish "no profile" from "profile fetch failed".
#[derive(Debug, Serialize)]
pub struct UserSection {
    pub data: Option<UserProfile>,
    pub error: Option<String>,
}

/// GET /auth/login: redirect the browser to the provider's authorization URL.
pub async fn login(State(state): State<Arc<AppState>>) -> Response {
    // Fail closed when the secure random source is unavailable: a predictable
    // state value is worse than no redirect.
    let login_state = match random_state() {
        Ok(value) => value,
        Err(error) => {
            error!(%error, "secure random source unavailable");
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "state_generation_failed",
                None,
            );
        }
    };

    let url = state.flow.login_url(&login_state, &state.config.redirect_uri);
    info!("redirecting to provider authorization URL");
    (StatusCode::FOUND, [(header::LOCATION, url)]).into_response()
}

/// GET /auth/callback: exchange the authorization code and answer with the
/// token (plus best-effort profile) as JSON or HTML.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Response {
    if let Some(provider_error) = query.error.as_deref().filter(|e| !e.is_empty()) {
        error!(provider_error, "oauth error on callback");
        return json_error(
            StatusCode::BAD_REQUEST,
            "oauth_error",
            Some(json!({ "error": provider_error })),
        );
    }

    let code = match query.code.as_deref().filter(|c| !c.is_empty()) {
        Some(code) => code,
        None => return json_error(StatusCode::BAD_REQUEST, "missing_code", None),
    };

    let token = match state
        .flow
        .handle_callback(code, &state.config.redirect_uri)
        .await
    {
        Ok(token) => token,
        Err(error) => {
            // Detail stays server-side; the client gets the bare reason tag.
            error!(%error, "token exchange failed");
            return json_error(StatusCode::BAD_GATEWAY, "token_exchange_failed", None);
        }
    };

    let user = match state
        .flow
        .fetch_user_info(&token.access_token, USER_INFO_FIELDS)
        .await
    {
        Ok(profile) => UserSection {
            data: Some(profile),
            error: None,
        },
        Err(error) => {
            error!(%error, "user info fetch failed");
            UserSection {
                data: None,
                error: Some(error.to_string()),
            }
        }
    };

    if wants_json(&headers, query.format.as_deref()) {
        (StatusCode::OK, Json(CallbackResponse { token, user })).into_response()
    } else {
        render::callback_page(&token, &user)
    }
}

fn random_state() -> Result<String, rand::Error> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}

fn wants_json(headers: &HeaderMap, format: Option<&str>) -> bool {
    if format == Some("json") {
        return true;
    }
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|accept| accept.contains("application/json") || accept.contains("+json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_state_is_32_hex_chars() {
        let state = random_state().unwrap();
        assert_eq!(state.len(), 32);
        assert!(state.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_state_is_not_constant() {
        assert_ne!(random_state().unwrap(), random_state().unwrap());
    }

    #[test]
    fn test_wants_json_from_accept_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(wants_json(&headers, None));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "text/html".parse().unwrap());
        assert!(!wants_json(&headers, None));
    }

    #[test]
    fn test_format_flag_overrides_accept() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "text/html".parse().unwrap());
        assert!(wants_json(&headers, Some("json")));
        assert!(!wants_json(&headers, Some("html")));
    }
}
