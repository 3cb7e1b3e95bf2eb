//! OAuth Flow
//!
//! Orchestrates the authorization-code pipeline over the injected provider
//! client and token store: build the login URL, exchange the callback code,
//! persist the token best-effort, and fetch the user profile.

use std::sync::Arc;

use tracing::warn;

use crate::error::{ExchangeError, UserInfoError};
use crate::provider::ProviderClient;
use crate::store::TokenStore;
use crate::types::{Token, UserProfile};

/// Authorization-code flow orchestrator.
///
/// Stateless beyond its injected collaborators and the configured scope.
pub struct OAuthFlow {
    client: Arc<dyn ProviderClient>,
    store: Arc<dyn TokenStore>,
    scope: String,
}

impl OAuthFlow {
    /// Create a flow over the given collaborators.
    pub fn new(client: Arc<dyn ProviderClient>, store: Arc<dyn TokenStore>, scope: String) -> Self {
        Self { client, store, scope }
    }

    /// Build the provider login URL with the configured scope. Pure.
    pub fn login_url(&self, state: &str, redirect_uri: &str) -> String {
        self.client.auth_url(state, redirect_uri, &self.scope)
    }

    /// Exchange the callback code for a token and persist it best-effort.
    ///
    /// A store failure is logged and swallowed; it never fails the callback.
    /// An exchange failure propagates unchanged and writes nothing.
    pub async fn handle_callback(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Token, ExchangeError> {
        let token = self.client.exchange(code, redirect_uri).await?;

        if let Err(error) = self.store.save(token.clone()).await {
            warn!(%error, "token store save failed, continuing");
        }

        Ok(token)
    }

    /// Fetch the authenticated user's profile.
    pub async fn fetch_user_info(
        &self,
        access_token: &str,
        fields: &[&str],
    ) -> Result<UserProfile, UserInfoError> {
        self.client.user_info(access_token, fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProviderClient;
    use crate::store::MockTokenStore;

    fn flow_with(
        client: Arc<MockProviderClient>,
        store: Arc<MockTokenStore>,
    ) -> OAuthFlow {
        OAuthFlow::new(client, store, "user.info.basic".to_string())
    }

    #[test]
    fn test_login_url_uses_configured_scope() {
        let client = Arc::new(MockProviderClient::new());
        let flow = flow_with(client.clone(), Arc::new(MockTokenStore::new()));

        flow.login_url("st4te", "https://app.example.com/auth/callback");

        let history = client.get_auth_url_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].0, "st4te");
        assert_eq!(history[0].2, "user.info.basic");
    }

    #[tokio::test]
    async fn test_callback_saves_exchanged_token() {
        let client = Arc::new(MockProviderClient::new());
        let store = Arc::new(MockTokenStore::new());
        let flow = flow_with(client, store.clone());

        let token = flow
            .handle_callback("code", "https://app.example.com/auth/callback")
            .await
            .unwrap();

        let saved = store.get_save_history();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], token);
    }

    #[tokio::test]
    async fn test_exchange_failure_propagates_without_save() {
        let client = Arc::new(MockProviderClient::new());
        client.set_next_exchange(Err(ExchangeError::Status {
            status: 502,
            body: String::new(),
        }));
        let store = Arc::new(MockTokenStore::new());
        let flow = flow_with(client, store.clone());

        let result = flow
            .handle_callback("code", "https://app.example.com/auth/callback")
            .await;

        assert!(matches!(result, Err(ExchangeError::Status { status: 502, .. })));
        assert!(store.get_save_history().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let client = Arc::new(MockProviderClient::new());
        let store = Arc::new(MockTokenStore::new());
        store.set_should_fail(true);
        let flow = flow_with(client, store);

        let token = flow
            .handle_callback("code", "https://app.example.com/auth/callback")
            .await
            .unwrap();

        assert_eq!(token.access_token, "mock-access-token");
    }

    #[tokio::test]
    async fn test_fetch_user_info_passthrough() {
        let client = Arc::new(MockProviderClient::new());
        let flow = flow_with(client.clone(), Arc::new(MockTokenStore::new()));

        let profile = flow
            .fetch_user_info("token", &["open_id", "display_name"])
            .await
            .unwrap();

        assert_eq!(profile.display_field("display_name"), "Mock User");
        let history = client.get_user_info_history();
        assert_eq!(history[0].1, vec!["open_id", "display_name"]);
    }
}
