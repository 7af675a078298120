//! Service layer for the snapshot application.
//!
//! This module contains the business logic for:
//! - Talking to the remote API (`SubmissionSource`, `SubmittableClient`)
//! - Paging through submissions (`SubmissionFetcher`)
//! - Resolving submitter identities (`SubmitterFetcher`)
//! - Classifying project names (`classify`, `extract_solution_number`)
//! - Computing per-submitter statistics (`SubmissionIndex`, `aggregate`)

mod aggregator;
mod api;
mod classifier;
mod source;
mod submissions;
mod submitters;

pub use aggregator::{SubmissionIndex, aggregate};
pub use api::SubmittableClient;
pub use classifier::{Category, ClassificationAmbiguity, classify, extract_solution_number};
pub use source::{
    AddressRecord, PageRequest, SubmissionPage, SubmissionRecord, SubmissionSource,
    SubmitterRecord, parse_page, parse_submitters,
};
pub use submissions::SubmissionFetcher;
pub use submitters::SubmitterFetcher;
