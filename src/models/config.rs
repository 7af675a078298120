//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Largest number of submission ids the submitters endpoint accepts per request.
pub const MAX_BATCH_SIZE: usize = 500;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Rendered report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Continuous serving settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        Url::parse(&self.api.base_url)?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.page_size == 0 {
            return Err(AppError::validation("api.page_size must be > 0"));
        }
        if self.api.batch_size == 0 || self.api.batch_size > MAX_BATCH_SIZE {
            return Err(AppError::validation(format!(
                "api.batch_size must be between 1 and {MAX_BATCH_SIZE}"
            )));
        }
        if self.serve.refresh_interval_secs == 0 {
            return Err(AppError::validation(
                "serve.refresh_interval_secs must be > 0",
            ));
        }
        if self.serve.username.is_some() != self.serve.password.is_some() {
            return Err(AppError::validation(
                "serve.username and serve.password must be set together",
            ));
        }
        Ok(())
    }
}

/// Remote submissions API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the submissions API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Number of submissions requested per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Number of submission ids sent per submitter lookup
    #[serde(default = "defaults::batch_size")]
    pub batch_size: usize,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            page_size: defaults::page_size(),
            batch_size: defaults::batch_size(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Rendered report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Document title
    #[serde(default = "defaults::title")]
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: defaults::title(),
        }
    }
}

/// Settings for the continuously refreshed report host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    #[serde(default = "defaults::host")]
    pub host: String,

    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Basic auth username (auth is enabled only when both credentials are set)
    #[serde(default)]
    pub username: Option<String>,

    /// Basic auth password
    #[serde(default)]
    pub password: Option<String>,

    /// Seconds between snapshot refreshes
    #[serde(default = "defaults::refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl ServeConfig {
    /// Basic auth credentials, if configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(password)) => Some((user.as_str(), password.as_str())),
            _ => None,
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            username: None,
            password: None,
            refresh_interval_secs: defaults::refresh_interval(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://submittable-api.submittable.com/v4".into()
    }
    pub fn page_size() -> usize {
        500
    }
    pub fn batch_size() -> usize {
        super::MAX_BATCH_SIZE
    }
    pub fn user_agent() -> String {
        concat!("submission-snapshot/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }

    pub fn title() -> String {
        "AMM Problems Section Submittable Viewer".into()
    }

    pub fn host() -> String {
        "0.0.0.0".into()
    }
    pub fn port() -> u16 {
        5000
    }
    pub fn refresh_interval() -> u64 {
        3600
    }
}
