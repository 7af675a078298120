//! Pipeline entry points for snapshot operations.
//!
//! - `run_snapshot`: Fetch, aggregate, render, and publish one snapshot
//! - `run_serve`: Refresh snapshots on a timer and serve the latest report

#[cfg(feature = "serve")]
pub mod serve;
pub mod snapshot;

#[cfg(feature = "serve")]
pub use serve::run_serve;
pub use snapshot::{SnapshotOptions, SnapshotSummary, run_snapshot};
