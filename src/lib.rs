//! TikTok OAuth2 Login Service
//!
//! Server-side authorization-code flow against TikTok's v2 identity
//! endpoints: issue a login redirect, receive the provider callback, exchange
//! the code for a token pair, fetch the user's profile, and answer the caller
//! with JSON or a rendered HTML page.
//!
//! # Architecture
//!
//! - `types`: token entity and the open profile document
//! - `error`: per-operation error hierarchy
//! - `config`: environment configuration
//! - `provider`: provider client contract and the TikTok wire client
//! - `store`: token store contract and the single-slot implementation
//! - `flows`: the orchestration pipeline over client + store
//! - `server`: axum boundary (handlers, content pages, rendering)
//! - `telemetry`: tracing setup with split output streams

pub mod config;
pub mod error;
pub mod flows;
pub mod provider;
pub mod server;
pub mod store;
pub mod telemetry;
pub mod types;

// Re-export the main surface
pub use config::AppConfig;
pub use error::{ConfigError, ExchangeError, StoreError, UserInfoError};
pub use flows::OAuthFlow;
pub use provider::{Endpoints, MockProviderClient, ProviderClient, TikTokClient};
pub use server::{router, AppState};
pub use store::{MockTokenStore, SingleSlotStore, TokenStore};
pub use types::{Token, UserProfile};
