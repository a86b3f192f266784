//! Server configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MESSAGES_UPSTREAM_URL: &str = "http://localhost:3001/messages";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("invalid MESSAGES_UPSTREAM_URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub messages_upstream_url: String,
    pub upstream_timeout: Duration,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `MESSAGES_UPSTREAM_URL`: default `http://localhost:3001/messages`
    /// - `UPSTREAM_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` is not a port number or the upstream
    /// URL is not an absolute `http(s)` URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let messages_upstream_url = lookup("MESSAGES_UPSTREAM_URL")
            .map_or_else(|| DEFAULT_MESSAGES_UPSTREAM_URL.to_owned(), |raw| raw.trim().to_owned());
        validate_upstream_url(&messages_upstream_url)?;

        let timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

        Ok(Self { port, messages_upstream_url, upstream_timeout: Duration::from_secs(timeout_secs) })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            messages_upstream_url: DEFAULT_MESSAGES_UPSTREAM_URL.to_owned(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

fn validate_upstream_url(raw: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl(format!("{raw}: unsupported scheme {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
