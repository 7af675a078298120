//! Storage abstractions for the published report.
//!
//! A snapshot produces exactly one artifact. Publishing replaces it
//! all-or-nothing, so readers (including the report server) only ever see the
//! previous document or the new one.

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a publish operation.
#[derive(Debug, Clone)]
pub struct PublishMetadata {
    /// Where the artifact now lives
    pub location: String,
    /// Size of the published document in bytes
    pub bytes: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for report storage backends.
#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Atomically replace the published report.
    async fn publish(&self, document: &str) -> Result<PublishMetadata>;

    /// Load the currently published report, if any.
    async fn load_current(&self) -> Result<Option<String>>;

    /// Human-readable location of the artifact.
    fn location(&self) -> String;
}
