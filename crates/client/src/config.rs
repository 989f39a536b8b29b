//! Client configuration (endpoint + transport settings).

use std::time::Duration;

use thiserror::Error;

pub const API_URL_ENV: &str = "COUNTRYGUIDE_API_URL";
pub const HTTP_TIMEOUT_ENV: &str = "COUNTRYGUIDE_HTTP_TIMEOUT_SECS";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Path of the recommendation endpoint, relative to `base_url`.
pub const RECOMMEND_PATH: &str = "/api/v1/recommend";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service origin without trailing slash, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Transport-level bound on one call. The session itself never times out.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{var} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load from `COUNTRYGUIDE_API_URL` / `COUNTRYGUIDE_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(ConfigError::Empty(API_URL_ENV));
        }

        let mut config = Self::new(base_url.trim());

        if let Some(raw) = lookup(HTTP_TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    var: HTTP_TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn recommend_url(&self) -> String {
        format!("{}{}", self.base_url, RECOMMEND_PATH)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
