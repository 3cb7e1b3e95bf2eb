//! HTTP Server
//!
//! Boundary adapter: the axum router, shared request state, and the common
//! error payload shape.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::flows::OAuthFlow;

pub mod handlers;
pub mod pages;
pub mod render;

/// Shared state for the request handlers.
pub struct AppState {
    pub flow: OAuthFlow,
    pub config: AppConfig,
}

impl AppState {
    /// Create the shared state.
    pub fn new(flow: OAuthFlow, config: AppConfig) -> Self {
        Self { flow, config }
    }
}

/// Error payload shape: a machine-readable reason tag plus optional detail.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Build a JSON error response.
pub(crate) fn json_error(
    status: StatusCode,
    message: &str,
    detail: Option<serde_json::Value>,
) -> Response {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
            detail,
        }),
    )
        .into_response()
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/healthz", get(pages::healthz))
        .route("/terms-of-service", get(pages::terms_of_service))
        .route("/privacy-policy", get(pages::privacy_policy))
        .route("/insights", get(pages::insights))
        .route("/auth/login", get(handlers::login))
        .route("/auth/callback", get(handlers::callback))
        .nest_service("/docs", ServeDir::new("docs"))
        // Signature-file fallback: GET /<filename> -> contents/signature/<filename>.
        .route("/{filename}", get(pages::signature_file))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let status = response.status().as_u16();
                        let latency_ms = latency.as_millis() as u64;
                        if status >= 400 {
                            tracing::error!(status, latency_ms, "request completed");
                        } else {
                            tracing::info!(status, latency_ms, "request completed");
                        }
                    },
                ),
        )
        .with_state(state)
}
