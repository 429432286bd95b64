//! Client configuration from the environment.

use std::time::Duration;

use thiserror::Error;

pub const API_URL_VAR: &str = "FRIDGEKIT_API_URL";
pub const AUTH_TOKEN_VAR: &str = "FRIDGEKIT_AUTH_TOKEN";
pub const TIMEOUT_VAR: &str = "FRIDGEKIT_TIMEOUT_SECS";
pub const NOTICE_VAR: &str = "FRIDGEKIT_NOTICE_MILLIS";

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_NOTICE: Duration = Duration::from_millis(2500);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Settings for talking to the inventory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, without the `/api` prefix.
    pub api_url: String,
    /// Bearer token; `None` means logged out.
    pub auth_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long transient notices stay visible.
    pub notice_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
            notice_duration: DEFAULT_NOTICE,
        }
    }
}

impl ClientConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                return Err(ConfigError::Empty(API_URL_VAR));
            }
            config.api_url = url.to_string();
        }

        config.auth_token = lookup(AUTH_TOKEN_VAR)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        if let Some(secs) = lookup(TIMEOUT_VAR) {
            config.timeout = Duration::from_secs(parse_number(TIMEOUT_VAR, &secs)?);
        }
        if let Some(millis) = lookup(NOTICE_VAR) {
            config.notice_duration = Duration::from_millis(parse_number(NOTICE_VAR, &millis)?);
        }

        Ok(config)
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        }),
    }
}
