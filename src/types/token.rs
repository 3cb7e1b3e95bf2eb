//! Token Entity
//!
//! The result of a successful code-for-token exchange. Created only by the
//! provider client, immutable once constructed, superseded (never merged) by
//! the next successful exchange.

use serde::Serialize;

/// OAuth token pair plus the provider-reported grant metadata.
///
/// Invariant: a successfully exchanged token always carries a non-empty
/// `access_token`; every other field falls back to its empty/zero value when
/// the provider omits it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Opaque bearer credential.
    pub access_token: String,
    /// Opaque refresh credential; may be empty.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    /// Token type, e.g. "Bearer".
    pub token_type: String,
    /// Granted-scope string as reported by the provider.
    pub scope: String,
    /// Provider-assigned stable user identifier.
    pub open_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_shape() {
        let token = Token {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: 3600,
            token_type: "Bearer".to_string(),
            scope: "user.info.basic".to_string(),
            open_id: "o".to_string(),
        };

        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["access_token"], "a");
        assert_eq!(value["refresh_token"], "r");
        assert_eq!(value["expires_in"], 3600);
        assert_eq!(value["token_type"], "Bearer");
        assert_eq!(value["scope"], "user.info.basic");
        assert_eq!(value["open_id"], "o");
    }

    #[test]
    fn test_default_is_zeroed() {
        let token = Token::default();
        assert!(token.access_token.is_empty());
        assert_eq!(token.expires_in, 0);
    }
}
