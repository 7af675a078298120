// src/services/submissions.rs

//! Submission fetcher.
//!
//! Pages through the submission listing strictly in order: the continuation
//! token for page N+1 is only known once page N has arrived, and page N is
//! fully merged before the next request goes out.

use std::collections::HashSet;

use crate::error::{AppError, Result};
use crate::models::Submission;
use crate::services::source::{PageRequest, SubmissionSource};

/// Service for collecting every submission from a [`SubmissionSource`].
pub struct SubmissionFetcher<'a> {
    source: &'a dyn SubmissionSource,
    page_size: usize,
}

impl<'a> SubmissionFetcher<'a> {
    pub fn new(source: &'a dyn SubmissionSource, page_size: usize) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
        }
    }

    /// Fetch all submissions, skipping those owned by erased accounts.
    ///
    /// With a `limit`, fetching stops on the first page that brings the total
    /// to at least `limit` and the result is cut to exactly `limit` records.
    pub async fn fetch_submissions(&self, limit: Option<usize>) -> Result<Vec<Submission>> {
        let mut submissions = Vec::new();
        let mut request = PageRequest::First {
            page_size: self.page_size,
        };
        let mut page_number = 0usize;
        let mut excluded = 0usize;
        let mut sent_tokens = HashSet::new();

        loop {
            let page = self.source.list_submissions(&request).await?;
            page_number += 1;

            let last = page.is_last();
            if !last && sent_tokens.contains(&page.continuation_token) {
                return Err(AppError::remote_data(
                    format!("submissions page {page_number}"),
                    format!(
                        "continuation token '{}' was already used",
                        page.continuation_token
                    ),
                ));
            }

            let received = page.items.len();
            for record in page.items {
                let submission = Submission::try_from(record)?;
                if submission.is_from_deleted_user() {
                    excluded += 1;
                    continue;
                }
                submissions.push(submission);
            }

            log::debug!(
                "Page {}: {} records received, {} submissions so far",
                page_number,
                received,
                submissions.len()
            );

            if let Some(limit) = limit {
                if submissions.len() >= limit {
                    submissions.truncate(limit);
                    log::info!(
                        "Submission limit of {} reached after {} page(s)",
                        limit,
                        page_number
                    );
                    break;
                }
            }

            if last {
                break;
            }
            sent_tokens.insert(page.continuation_token.clone());
            request = PageRequest::Continue(page.continuation_token);
        }

        if excluded > 0 {
            log::info!("Excluded {} submissions from deleted accounts", excluded);
        }
        log::info!(
            "Fetched {} submissions across {} page(s)",
            submissions.len(),
            page_number
        );

        Ok(submissions)
    }
}
