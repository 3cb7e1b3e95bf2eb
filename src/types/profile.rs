//! User Profile Document
//!
//! The provider's user-info payload is an open JSON document; nothing in it
//! is validated beyond the display fields the callback page needs. The two
//! nesting shapes observed in the wild (`data.user.*` and `data.data.user.*`)
//! are probed by an explicit lookup rather than reflection.

use serde::Serialize;
use serde_json::Value;

/// Untyped profile document returned by the user-info endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserProfile(Value);

impl UserProfile {
    /// Wrap a decoded JSON document.
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// Borrow the raw document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Extract a display field as a string.
    ///
    /// Probes `data.user.<name>` first, then `data.data.user.<name>`; absent
    /// keys and non-string values map to the empty string.
    pub fn display_field(&self, name: &str) -> &str {
        lookup(&self.0, &["data", "user", name])
            .or_else(|| lookup(&self.0, &["data", "data", "user", name]))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

fn lookup<'a>(document: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(document, |node, key| node.get(key))
}
