//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds one pooled HTTP client for the upstream message service and the
//! URL that `/api/messages` proxies to.

use std::sync::Arc;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub messages_upstream_url: Arc<str>,
}

impl AppState {
    /// Build state from server config.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the HTTP client cannot be constructed
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;
        Ok(Self { http, messages_upstream_url: Arc::from(config.messages_upstream_url.as_str()) })
    }
}
