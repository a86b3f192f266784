//! Message history proxy.
//!
//! `GET /api/messages` forwards to the upstream message service and returns
//! its JSON body byte for byte. The body is only checked for being JSON, never
//! re-encoded, so key order and formatting survive. Any upstream failure
//! collapses to a 500 with a fixed `{"error": ...}` body; details only go to
//! the log.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::de::IgnoredAny;
use serde_json::json;

use crate::state::AppState;

/// Upstream could not be reached or answered with a non-success status.
pub const FETCH_FAILED: &str = "Failed to fetch messages";
/// Upstream answered, but its body is not usable JSON.
pub const INTERNAL_ERROR: &str = "Internal Server Error";

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),

    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("failed to read upstream body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("upstream body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

impl ProxyError {
    /// Message exposed to the caller. Never includes upstream details.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Upstream(_) | Self::UpstreamStatus(_) => FETCH_FAILED,
            Self::Body(_) | Self::InvalidJson(_) => INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// `GET /api/messages`: pass the upstream message list through.
pub async fn list_messages(State(state): State<AppState>) -> Result<Response, ProxyError> {
    match fetch_messages(&state).await {
        Ok(body) => Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response()),
        Err(e) => {
            tracing::error!(error = %e, upstream = %state.messages_upstream_url, "error fetching messages");
            Err(e)
        }
    }
}

async fn fetch_messages(state: &AppState) -> Result<Bytes, ProxyError> {
    let response = state
        .http
        .get(state.messages_upstream_url.as_ref())
        .send()
        .await
        .map_err(ProxyError::Upstream)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProxyError::UpstreamStatus(status.as_u16()));
    }

    let body = response.bytes().await.map_err(ProxyError::Body)?;
    serde_json::from_slice::<IgnoredAny>(&body).map_err(ProxyError::InvalidJson)?;
    Ok(body)
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
