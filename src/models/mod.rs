// src/models/mod.rs

//! Domain models for the snapshot application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod stats;
mod submission;
mod submitter;

// Re-export all public types
pub use config::{ApiConfig, Config, MAX_BATCH_SIZE, ReportConfig, ServeConfig};
pub use stats::SubmitterStats;
pub use submission::{ACCEPTED_STATUS, GDPR_DELETED_USER_ID, Submission};
pub use submitter::{PLACEHOLDER, Submitter};
