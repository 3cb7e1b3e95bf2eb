//! Content Pages
//!
//! Static content endpoints: top page, policy documents, health check, and
//! the signature-file fallback route.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use super::AppState;

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    serve_content(
        state.config.contents_dir.join("index.html"),
        "text/html; charset=utf-8",
        "index.html not found",
    )
    .await
}

/// GET /terms-of-service
pub async fn terms_of_service(State(state): State<Arc<AppState>>) -> Response {
    serve_content(
        state.config.contents_dir.join("terms_of_service.txt"),
        "text/plain; charset=utf-8",
        "terms_of_service.txt not found",
    )
    .await
}

/// GET /privacy-policy
pub async fn privacy_policy(State(state): State<Arc<AppState>>) -> Response {
    serve_content(
        state.config.contents_dir.join("privacy_policy.txt"),
        "text/plain; charset=utf-8",
        "privacy_policy.txt not found",
    )
    .await
}

/// GET /insights
pub async fn insights(State(state): State<Arc<AppState>>) -> Response {
    serve_content(
        state.config.contents_dir.join("insights.html"),
        "text/html; charset=utf-8",
        "insights.html not found",
    )
    .await
}

/// GET /{filename}: serve contents/signature/<filename>.
pub async fn signature_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Response {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return (StatusCode::BAD_REQUEST, "invalid filename").into_response();
    }

    let path = state.config.contents_dir.join("signature").join(&filename);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let lower = filename.to_ascii_lowercase();
            let content_type = if lower.ends_with(".txt") {
                "text/plain; charset=utf-8"
            } else if lower.ends_with(".html") {
                "text/html; charset=utf-8"
            } else {
                "application/octet-stream"
            };
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(_) => {
            warn!(%filename, "file not found in contents");
            (StatusCode::NOT_FOUND, "file not found").into_response()
        }
    }
}

async fn serve_content(path: PathBuf, content_type: &'static str, missing: &'static str) -> Response {
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(read_error) => {
            error!(path = %path.display(), %read_error, "failed to read content file");
            (StatusCode::INTERNAL_SERVER_ERROR, missing).into_response()
        }
    }
}
