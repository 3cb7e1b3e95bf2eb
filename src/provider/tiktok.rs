//! TikTok Provider Client
//!
//! Wire contract with TikTok's v2 identity endpoints: authorization URL,
//! form-encoded code-for-token exchange, and Bearer-authenticated user-info
//! retrieval. Per-call and stateless; safe to share across requests.

use async_trait::async_trait;
use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{ConfigError, ExchangeError, UserInfoError};
use crate::types::{Token, UserProfile};

use super::ProviderClient;

/// TikTok v2 authorization endpoint.
pub const AUTH_ENDPOINT: &str = "https://www.tiktok.com/v2/auth/authorize/";
/// TikTok v2 token endpoint.
pub const TOKEN_ENDPOINT: &str = "https://open.tiktokapis.com/v2/oauth/token/";
/// TikTok v2 user-info endpoint.
pub const USER_INFO_ENDPOINT: &str = "https://open.tiktokapis.com/v2/user/info/";

/// Token response bodies larger than this are rejected.
const TOKEN_BODY_LIMIT: usize = 1 << 20;
/// User-info response bodies larger than this are rejected.
const USER_INFO_BODY_LIMIT: usize = 2 << 20;
/// Diagnostic body snippets are truncated to this many bytes.
const SNIPPET_LIMIT: usize = 2048;

/// Provider endpoint set. Overridable for tests; production uses the fixed
/// TikTok v2 endpoints.
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub authorize: String,
    pub token: String,
    pub user_info: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorize: AUTH_ENDPOINT.to_string(),
            token: TOKEN_ENDPOINT.to_string(),
            user_info: USER_INFO_ENDPOINT.to_string(),
        }
    }
}

/// Reqwest-backed TikTok client.
pub struct TikTokClient {
    client_key: String,
    client_secret: SecretString,
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl TikTokClient {
    /// Create a client against the fixed TikTok endpoints.
    pub fn new(client_key: String, client_secret: SecretString, http: reqwest::Client) -> Self {
        Self::with_endpoints(client_key, client_secret, http, Endpoints::default())
    }

    /// Create a client against custom endpoints.
    pub fn with_endpoints(
        client_key: String,
        client_secret: SecretString,
        http: reqwest::Client,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            client_key,
            client_secret,
            http,
            endpoints,
        }
    }

    /// Build a client from the process configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient { message: e.to_string() })?;

        Ok(Self::new(
            config.client_key.clone(),
            config.client_secret.clone(),
            http,
        ))
    }
}

#[async_trait]
impl ProviderClient for TikTokClient {
    fn auth_url(&self, state: &str, redirect_uri: &str, scope: &str) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("client_key", &self.client_key);
        query.append_pair("response_type", "code");
        if !scope.is_empty() {
            query.append_pair("scope", scope);
        }
        query.append_pair("redirect_uri", redirect_uri);
        if !state.is_empty() {
            query.append_pair("state", state);
        }
        format!("{}?{}", self.endpoints.authorize, query.finish())
    }

    async fn exchange(&self, code: &str, redirect_uri: &str) -> Result<Token, ExchangeError> {
        // redirect_uri must match the value used at the authorize step.
        let form = [
            ("client_key", self.client_key.as_str()),
            ("client_secret", self.client_secret.expose_secret().as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
        ];

        let response = self.http.post(&self.endpoints.token).form(&form).send().await?;

        let status = response.status();
        let body = read_capped(response, TOKEN_BODY_LIMIT).await.map_err(|e| match e {
            BodyError::Transport(e) => ExchangeError::Transport(e),
            BodyError::TooLarge(limit) => ExchangeError::BodyTooLarge { limit },
        })?;

        if !status.is_success() {
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        decode_token_body(&body)
    }

    async fn user_info(
        &self,
        access_token: &str,
        fields: &[&str],
    ) -> Result<UserProfile, UserInfoError> {
        if access_token.is_empty() {
            return Err(UserInfoError::MissingAccessToken);
        }

        let mut request = self.http.get(&self.endpoints.user_info).bearer_auth(access_token);
        if !fields.is_empty() {
            request = request.query(&[("fields", fields.join(","))]);
        }

        let response = request.send().await?;

        let status = response.status();
        let body = read_capped(response, USER_INFO_BODY_LIMIT)
            .await
            .map_err(|e| match e {
                BodyError::Transport(e) => UserInfoError::Transport(e),
                BodyError::TooLarge(limit) => UserInfoError::BodyTooLarge { limit },
            })?;

        if !status.is_success() {
            return Err(UserInfoError::Status {
                status: status.as_u16(),
                snippet: truncate_snippet(&body, SNIPPET_LIMIT),
            });
        }

        let document: Value = serde_json::from_slice(&body)
            .map_err(|e| UserInfoError::Decode { message: e.to_string() })?;
        if !document.is_object() {
            return Err(UserInfoError::Decode {
                message: "user info response is not a JSON object".to_string(),
            });
        }

        Ok(UserProfile::new(document))
    }
}

enum BodyError {
    Transport(reqwest::Error),
    TooLarge(usize),
}

/// Read a response body through a hard size cap, aborting early on oversize.
async fn read_capped(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, BodyError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(BodyError::Transport)?;
        if body.len() + chunk.len() > limit {
            return Err(BodyError::TooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Decode a 2xx token-exchange body.
///
/// TikTok wraps the payload as `{"data": {...}}`; a flat body is accepted as
/// fallback when no wrapper field is present. Field extraction is permissive:
/// missing keys yield empty values, and `expires_in` is normalized from
/// integer, float, or numeric-string form.
fn decode_token_body(body: &[u8]) -> Result<Token, ExchangeError> {
    let root: Value = serde_json::from_slice(body)
        .map_err(|e| ExchangeError::Decode { message: e.to_string() })?;

    if let Some(error) = root.get("error").and_then(Value::as_str) {
        if !error.is_empty() {
            let message = root
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Err(ExchangeError::Provider {
                error: error.to_string(),
                message: message.to_string(),
            });
        }
    }

    let data = match root.get("data") {
        Some(Value::Object(wrapped)) => wrapped,
        _ => root.as_object().ok_or_else(|| ExchangeError::Decode {
            message: "unexpected token response format".to_string(),
        })?,
    };

    let token = Token {
        access_token: str_field(data, "access_token"),
        refresh_token: str_field(data, "refresh_token"),
        expires_in: int_field(data, "expires_in"),
        token_type: str_field(data, "token_type"),
        scope: str_field(data, "scope"),
        open_id: str_field(data, "open_id"),
    };

    if token.access_token.is_empty() {
        return Err(ExchangeError::Decode {
            message: "missing access_token in token response".to_string(),
        });
    }

    Ok(token)
}

fn str_field(data: &serde_json::Map<String, Value>, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn int_field(data: &serde_json::Map<String, Value>, key: &str) -> i64 {
    match data.get(key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Some(Value::String(s)) => s
            .parse::<i64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn truncate_snippet(body: &[u8], limit: usize) -> String {
    if body.len() <= limit {
        String::from_utf8_lossy(body).into_owned()
    } else {
        format!("{}...", String::from_utf8_lossy(&body[..limit]))
    }
}
