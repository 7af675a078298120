// src/pipeline/snapshot.rs

//! One snapshot: fetch → resolve → aggregate → render → publish.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Config;
use crate::report::{ReportData, render_report};
use crate::services::{SubmissionFetcher, SubmissionSource, SubmitterFetcher};
use crate::storage::ReportStorage;
use crate::utils;

/// Knobs for a single snapshot run.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    pub page_size: usize,
    pub batch_size: usize,
    /// Stop after this many submissions (testing aid)
    pub limit: Option<usize>,
    pub title: String,
}

impl SnapshotOptions {
    pub fn from_config(config: &Config, limit: Option<usize>) -> Self {
        Self {
            page_size: config.api.page_size,
            batch_size: config.api.batch_size,
            limit,
            title: config.report.title.clone(),
        }
    }
}

/// Outcome of a published snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotSummary {
    pub submission_count: usize,
    pub submitter_count: usize,
    pub location: String,
    pub bytes: usize,
    pub generated_at: DateTime<Utc>,
    pub limit: Option<usize>,
}

/// Run one snapshot and publish the rendered report.
///
/// Any fetch error aborts before the storage is touched, so the previously
/// published report stays in place.
pub async fn run_snapshot(
    source: &dyn SubmissionSource,
    storage: &dyn ReportStorage,
    options: &SnapshotOptions,
) -> Result<SnapshotSummary> {
    utils::log::header("Submission snapshot");

    utils::log::step(1, 4, "Fetching submissions");
    let submissions = SubmissionFetcher::new(source, options.page_size)
        .fetch_submissions(options.limit)
        .await?;

    utils::log::step(2, 4, "Resolving submitters");
    let submission_ids: Vec<String> = submissions.iter().map(|s| s.id.clone()).collect();
    let submitters = SubmitterFetcher::new(source, options.batch_size)
        .fetch_submitters(&submission_ids)
        .await?;

    utils::log::step(3, 4, "Aggregating statistics");
    let generated_at = Utc::now();
    let data = ReportData::build(&options.title, generated_at, &submissions, &submitters);
    let document = render_report(&data)?;

    utils::log::step(4, 4, "Publishing report");
    let published = storage.publish(&document).await?;

    let summary = SnapshotSummary {
        submission_count: submissions.len(),
        submitter_count: submitters.len(),
        location: published.location,
        bytes: published.bytes,
        generated_at,
        limit: options.limit,
    };

    utils::log::summary(
        "Snapshot complete",
        &[
            ("Submissions", summary.submission_count.to_string()),
            ("Submitters", summary.submitter_count.to_string()),
            ("Output", summary.location.clone()),
            ("Size", format!("{} bytes", summary.bytes)),
        ],
    );
    if let Some(limit) = summary.limit {
        log::warn!(
            "This snapshot was limited to {} submissions for testing purposes.",
            limit
        );
    }

    Ok(summary)
}
