//! Error Types
//!
//! Per-operation error hierarchy for the OAuth login service.

use thiserror::Error;

/// Code-for-token exchange error.
///
/// Surfaced to HTTP clients as a bare 502; the detail stays in the server
/// logs.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token exchange failed: status={status} body={body}")]
    Status { status: u16, body: String },

    #[error("decode token response: {message}")]
    Decode { message: String },

    /// Provider reported an explicit error field in its payload.
    #[error("{error}: {message}")]
    Provider { error: String, message: String },

    #[error("token response exceeded {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Profile fetch error.
///
/// Never fatal to a callback: a successful token exchange is returned even
/// when the profile fetch fails.
#[derive(Error, Debug)]
pub enum UserInfoError {
    /// Rejected before any network call.
    #[error("missing access token")]
    MissingAccessToken,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("user info failed: status={status} body={snippet}")]
    Status { status: u16, snippet: String },

    #[error("decode user info: {message}")]
    Decode { message: String },

    #[error("user info response exceeded {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Token store error. Persistence is best-effort; callers log and continue.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("token store write failed: {message}")]
    WriteFailed { message: String },
}

/// Startup configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {name}")]
    MissingVar { name: String },

    #[error("invalid value for {name}: {message}")]
    InvalidVar { name: String, message: String },

    #[error("failed to build HTTP client: {message}")]
    HttpClient { message: String },
}
