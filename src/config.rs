//! Process configuration resolved from the environment.
//!
//! The configuration is read once at startup and then passed explicitly to the
//! API client and the services. Nothing reads the environment after that.

use std::env;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

pub const API_KEY_VAR: &str = "PLANE_API_KEY";
pub const WORKSPACE_SLUG_VAR: &str = "PLANE_WORKSPACE_SLUG";
pub const BASE_URL_VAR: &str = "PLANE_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "PLANE_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://app.plane.so/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} environment variable is not set.")]
    #[diagnostic(
        code(plane_mcp::config::missing_var),
        help("Export {name} before starting the server.")
    )]
    MissingVar { name: &'static str },

    #[error("{name} has an invalid value '{value}': {reason}")]
    #[diagnostic(code(plane_mcp::config::invalid_var))]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Immutable settings shared by the client and every service.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub workspace_slug: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("workspace_slug", &self.workspace_slug)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// Build a configuration with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>, workspace_slug: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            workspace_slug: workspace_slug.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the API base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingVar { name: API_KEY_VAR })?;
        let workspace_slug = get(WORKSPACE_SLUG_VAR).ok_or(ConfigError::MissingVar {
            name: WORKSPACE_SLUG_VAR,
        })?;

        let mut config = Config::new(api_key, workspace_slug);

        if let Some(base_url) = get(BASE_URL_VAR) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidVar {
                    name: TIMEOUT_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            if secs == 0 {
                return Err(ConfigError::InvalidVar {
                    name: TIMEOUT_VAR,
                    value: raw,
                    reason: "timeout must be at least one second".to_string(),
                });
            }
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
