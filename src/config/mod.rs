//! Configuration
//!
//! Environment-variable configuration, loaded once at startup and shared by
//! reference for the process lifetime.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default requested scope when `TIKTOK_SCOPE` is unset.
pub const DEFAULT_SCOPE: &str = "user.info.basic";

/// Default HTTP listen port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Default outbound provider-call timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Process configuration.
///
/// Read-only after startup, so it is shared across requests without locking.
#[derive(Clone)]
pub struct AppConfig {
    /// Client key issued by the provider.
    pub client_key: String,
    /// Client secret issued by the provider.
    pub client_secret: SecretString,
    /// Redirect URI registered with the provider; presented identically in
    /// the authorize and token-exchange steps.
    pub redirect_uri: String,
    /// Requested permission set.
    pub scope: String,
    /// HTTP listen port.
    pub port: u16,
    /// Outbound provider-call timeout.
    pub http_timeout: Duration,
    /// Directory holding the static content pages.
    pub contents_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingVar { name: name.to_string() })
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                name: "PORT".to_string(),
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            client_key: required("TIKTOK_CLIENT_KEY")?,
            client_secret: SecretString::new(required("TIKTOK_CLIENT_SECRET")?),
            redirect_uri: required("OAUTH_REDIRECT_URI")?,
            scope: lookup("TIKTOK_SCOPE")
                .filter(|scope| !scope.is_empty())
                .unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            port,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            contents_dir: PathBuf::from("contents"),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("client_key", &self.client_key)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("port", &self.port)
            .field("http_timeout", &self.http_timeout)
            .field("contents_dir", &self.contents_dir)
            .finish()
    }
}
