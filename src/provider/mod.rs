//! Provider Client
//!
//! Contract with the identity provider: authorization-URL construction,
//! code-for-token exchange, and user-profile retrieval.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ExchangeError, UserInfoError};
use crate::types::{Token, UserProfile};

pub mod tiktok;

pub use tiktok::{Endpoints, TikTokClient};

/// Identity-provider capability set (for dependency injection).
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Build the provider's authorization URL. Pure string construction;
    /// empty `scope` and `state` are omitted from the query.
    fn auth_url(&self, state: &str, redirect_uri: &str, scope: &str) -> String;

    /// Exchange an authorization code for a token pair. `redirect_uri` must
    /// equal the value presented at the authorize step.
    async fn exchange(&self, code: &str, redirect_uri: &str) -> Result<Token, ExchangeError>;

    /// Fetch the authenticated user's profile with the given field set.
    async fn user_info(
        &self,
        access_token: &str,
        fields: &[&str],
    ) -> Result<UserProfile, UserInfoError>;
}

/// Mock provider client for testing.
#[derive(Default)]
pub struct MockProviderClient {
    auth_url_history: Mutex<Vec<(String, String, String)>>,
    exchange_history: Mutex<Vec<(String, String)>>,
    user_info_history: Mutex<Vec<(String, Vec<String>)>>,
    next_exchange: Mutex<Option<Result<Token, ExchangeError>>>,
    next_user_info: Mutex<Option<Result<UserProfile, UserInfoError>>>,
}

impl MockProviderClient {
    /// Create a new mock provider client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the next exchange result.
    pub fn set_next_exchange(&self, result: Result<Token, ExchangeError>) -> &Self {
        *self.next_exchange.lock().unwrap() = Some(result);
        self
    }

    /// Set the next user-info result.
    pub fn set_next_user_info(&self, result: Result<UserProfile, UserInfoError>) -> &Self {
        *self.next_user_info.lock().unwrap() = Some(result);
        self
    }

    /// Get recorded `auth_url` calls as (state, redirect_uri, scope).
    pub fn get_auth_url_history(&self) -> Vec<(String, String, String)> {
        self.auth_url_history.lock().unwrap().clone()
    }

    /// Get recorded `exchange` calls as (code, redirect_uri).
    pub fn get_exchange_history(&self) -> Vec<(String, String)> {
        self.exchange_history.lock().unwrap().clone()
    }

    /// Get recorded `user_info` calls as (access_token, fields).
    pub fn get_user_info_history(&self) -> Vec<(String, Vec<String>)> {
        self.user_info_history.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderClient for MockProviderClient {
    fn auth_url(&self, state: &str, redirect_uri: &str, scope: &str) -> String {
        self.auth_url_history.lock().unwrap().push((
            state.to_string(),
            redirect_uri.to_string(),
            scope.to_string(),
        ));
        format!(
            "https://mock.example.com/authorize?client_key=mock&redirect_uri={redirect_uri}&state={state}"
        )
    }

    async fn exchange(&self, code: &str, redirect_uri: &str) -> Result<Token, ExchangeError> {
        self.exchange_history
            .lock()
            .unwrap()
            .push((code.to_string(), redirect_uri.to_string()));

        if let Some(result) = self.next_exchange.lock().unwrap().take() {
            return result;
        }

        Ok(Token {
            access_token: "mock-access-token".to_string(),
            refresh_token: "mock-refresh-token".to_string(),
            expires_in: 3600,
            token_type: "Bearer".to_string(),
            scope: "user.info.basic".to_string(),
            open_id: "mock-open-id".to_string(),
        })
    }

    async fn user_info(
        &self,
        access_token: &str,
        fields: &[&str],
    ) -> Result<UserProfile, UserInfoError> {
        if access_token.is_empty() {
            return Err(UserInfoError::MissingAccessToken);
        }

        self.user_info_history.lock().unwrap().push((
            access_token.to_string(),
            fields.iter().map(|f| f.to_string()).collect(),
        ));

        if let Some(result) = self.next_user_info.lock().unwrap().take() {
            return result;
        }

        Ok(UserProfile::new(serde_json::json!({
            "data": {"user": {
                "open_id": "mock-open-id",
                "display_name": "Mock User",
                "avatar_url": "https://cdn.example.com/avatar.png"
            }}
        })))
    }
}
