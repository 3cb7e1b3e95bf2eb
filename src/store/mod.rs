//! Token Store
//!
//! Holds the most recently exchanged token. The only implementation is a
//! single-slot, latest-write-wins store: there is no per-user keying, so
//! concurrent callbacks from different end users overwrite each other. That
//! is the documented contract, not an accident (see DESIGN.md).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::Token;

/// Token persistence contract.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist a token, superseding whatever was stored before.
    async fn save(&self, token: Token) -> Result<(), StoreError>;
}

/// In-memory single-slot store.
#[derive(Default)]
pub struct SingleSlotStore {
    slot: Mutex<Option<Token>>,
}

impl SingleSlotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the most recently saved token.
    pub fn latest(&self) -> Option<Token> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

#[async_trait]
impl TokenStore for SingleSlotStore {
    async fn save(&self, token: Token) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(token);
        Ok(())
    }
}

/// Mock token store for testing.
#[derive(Default)]
pub struct MockTokenStore {
    save_history: Mutex<Vec<Token>>,
    should_fail: Mutex<bool>,
}

impl MockTokenStore {
    /// Create a new mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the store to fail every save.
    pub fn set_should_fail(&self, should_fail: bool) -> &Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    /// Get recorded saves.
    pub fn get_save_history(&self) -> Vec<Token> {
        self.save_history.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn save(&self, token: Token) -> Result<(), StoreError> {
        if *self.should_fail.lock().unwrap() {
            return Err(StoreError::WriteFailed {
                message: "mock store failure".to_string(),
            });
        }

        self.save_history.lock().unwrap().push(token);
        Ok(())
    }
}
