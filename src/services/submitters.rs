// src/services/submitters.rs

//! Submitter fetcher.
//!
//! Resolves submitters for a list of submission ids in fixed-size batches and
//! reconciles the returned profile fragments into one [`Submitter`] per id.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::{MAX_BATCH_SIZE, Submitter};
use crate::services::source::SubmissionSource;

/// Service for resolving submitter identities.
pub struct SubmitterFetcher<'a> {
    source: &'a dyn SubmissionSource,
    batch_size: usize,
}

impl<'a> SubmitterFetcher<'a> {
    /// Create a fetcher; the batch size is clamped to `1..=MAX_BATCH_SIZE`.
    pub fn new(source: &'a dyn SubmissionSource, batch_size: usize) -> Self {
        Self {
            source,
            batch_size: batch_size.clamp(1, MAX_BATCH_SIZE),
        }
    }

    /// Resolve the submitters owning `submission_ids`.
    ///
    /// Every id is sent in exactly one batch. The result holds one entry per
    /// distinct submitter id, in first-seen order; placeholder fields are
    /// filled from later fragments of the same submitter.
    pub async fn fetch_submitters(&self, submission_ids: &[String]) -> Result<Vec<Submitter>> {
        let mut submitters: Vec<Submitter> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut fragments = 0usize;

        for (batch_number, batch) in submission_ids.chunks(self.batch_size).enumerate() {
            let records = self.source.resolve_submitters(batch).await?;
            log::debug!(
                "Submitter batch {}: {} ids, {} profiles",
                batch_number + 1,
                batch.len(),
                records.len()
            );

            for record in records {
                let submitter = Submitter::try_from(record)?;
                fragments += 1;

                match positions.get(&submitter.id) {
                    Some(&index) => submitters[index].fill_missing_from(&submitter),
                    None => {
                        positions.insert(submitter.id.clone(), submitters.len());
                        submitters.push(submitter);
                    }
                }
            }
        }

        log::info!(
            "Resolved {} submitters from {} profile fragments",
            submitters.len(),
            fragments
        );

        Ok(submitters)
    }
}
