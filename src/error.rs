// src/error.rs

//! Unified error handling for the snapshot application.

use std::fmt;

use thiserror::Error;

/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Network-level failure talking to the remote source
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote source answered with a non-success status
    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// Remote source returned a malformed or incomplete page
    #[error("Remote data error in {context}: {message}")]
    RemoteData { context: String, message: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Report rendering failed
    #[error("Render error: {0}")]
    Render(#[from] fmt::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A background task stopped unexpectedly
    #[error("Background task failed: {0}")]
    Task(String),
}

impl AppError {
    /// Create a remote data error with context.
    pub fn remote_data(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::RemoteData {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the error came from the network or an unsuccessful HTTP status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    /// Whether the remote source sent data that broke its contract.
    pub fn is_remote_data(&self) -> bool {
        matches!(self, Self::RemoteData { .. })
    }
}
