// src/services/aggregator.rs

//! Statistics aggregation.
//!
//! The submission set is partitioned by submitter and category once; every
//! per-submitter lookup then reads from that partition. Results depend only on
//! the set of submissions, never on their order.

use std::collections::{BTreeSet, HashMap};

use crate::models::{Submission, SubmitterStats};
use crate::services::classifier::{Category, classify, extract_solution_number};

#[derive(Debug, Default)]
struct Partition<'a> {
    submitted_problems: usize,
    accepted_problems: usize,
    /// Solution project name -> every submission under it was accepted
    solutions: HashMap<&'a str, bool>,
    solution_numbers: BTreeSet<u64>,
}

impl<'a> Partition<'a> {
    fn add(&mut self, submission: &'a Submission) {
        match classify(&submission.project_name) {
            Category::Problem => {
                self.submitted_problems += 1;
                if submission.is_accepted() {
                    self.accepted_problems += 1;
                }
            }
            Category::Solution => {
                let accepted = self
                    .solutions
                    .entry(submission.project_name.as_str())
                    .or_insert(true);
                *accepted &= submission.is_accepted();

                match extract_solution_number(&submission.project_name) {
                    Ok(number) => {
                        self.solution_numbers.insert(number);
                    }
                    Err(reason) => log::debug!("Skipping solution number: {}", reason),
                }
            }
        }
    }

    fn stats(&self) -> SubmitterStats {
        SubmitterStats {
            submitted_problems_count: self.submitted_problems,
            submitted_solutions_count: self.solutions.len(),
            accepted_problems_count: self.accepted_problems,
            accepted_solutions_count: self.solutions.values().filter(|&&ok| ok).count(),
        }
    }
}

/// Submissions partitioned by submitter and category.
#[derive(Debug, Default)]
pub struct SubmissionIndex<'a> {
    by_submitter: HashMap<&'a str, Partition<'a>>,
}

impl<'a> SubmissionIndex<'a> {
    /// Build the index in a single pass over `submissions`.
    pub fn new(submissions: &'a [Submission]) -> Self {
        let mut by_submitter: HashMap<&'a str, Partition<'a>> = HashMap::new();
        for submission in submissions {
            by_submitter
                .entry(submission.submitter_id.as_str())
                .or_default()
                .add(submission);
        }
        Self { by_submitter }
    }

    /// Statistics for one submitter; all zero if they have no submissions.
    pub fn stats_for(&self, submitter_id: &str) -> SubmitterStats {
        self.by_submitter
            .get(submitter_id)
            .map(Partition::stats)
            .unwrap_or_default()
    }

    /// Sorted, deduplicated solution numbers for one submitter.
    ///
    /// Project names without exactly one number are left out.
    pub fn solution_numbers(&self, submitter_id: &str) -> Vec<u64> {
        self.by_submitter
            .get(submitter_id)
            .map(|p| p.solution_numbers.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of distinct submitters seen in the submission set.
    pub fn submitter_count(&self) -> usize {
        self.by_submitter.len()
    }
}

/// Compute statistics for a single submitter.
pub fn aggregate(submissions: &[Submission], submitter_id: &str) -> SubmitterStats {
    SubmissionIndex::new(submissions).stats_for(submitter_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(id: &str, submitter: &str, project: &str, status: &str) -> Submission {
        Submission {
            id: id.to_string(),
            status: status.to_string(),
            submitter_id: submitter.to_string(),
            project_name: project.to_string(),
        }
    }

    #[test]
    fn test_distinct_solution_counting() {
        let submissions = vec![
            submission("a", "u1", "S1", "accepted"),
            submission("b", "u1", "S1", "rejected"),
            submission("c", "u1", "S2", "accepted"),
        ];

        let stats = aggregate(&submissions, "u1");
        assert_eq!(stats.submitted_solutions_count, 2);
        assert_eq!(stats.accepted_solutions_count, 1);
        assert_eq!(stats.submitted_problems_count, 0);
    }

    #[test]
    fn test_resubmitted_accepted_solution_counts_once() {
        let submissions = vec![
            submission("a", "u1", "Solution 7", "accepted"),
            submission("b", "u1", "Solution 7", "accepted"),
        ];

        let stats = aggregate(&submissions, "u1");
        assert_eq!(stats.submitted_solutions_count, 1);
        assert_eq!(stats.accepted_solutions_count, 1);
    }

    #[test]
    fn test_problems_count_raw_rows() {
        let submissions = vec![
            submission("a", "u1", "Open Problem", "accepted"),
            submission("b", "u1", "Open Problem", "declined"),
            submission("c", "u1", "Another Problem", "withdrawn"),
            submission("d", "u2", "Open Problem", "accepted"),
        ];

        let stats = aggregate(&submissions, "u1");
        assert_eq!(stats.submitted_problems_count, 3);
        assert_eq!(stats.accepted_problems_count, 1);
        assert_eq!(stats.submitted_solutions_count, 0);
    }

    #[test]
    fn test_unknown_submitter_is_zero() {
        let submissions = vec![submission("a", "u1", "Open Problem", "accepted")];
        assert_eq!(aggregate(&submissions, "nobody"), SubmitterStats::default());
    }

    #[test]
    fn test_accepted_never_exceeds_submitted() {
        let statuses = ["accepted", "rejected", "withdrawn", "in_progress"];
        let projects = ["Open Problem", "Problem 1", "Problem 2", "Problem 1 rev"];
        let mut submissions = Vec::new();
        for i in 0..64 {
            submissions.push(submission(
                &format!("s{i}"),
                &format!("u{}", i % 5),
                projects[(i / 3) % projects.len()],
                statuses[i % statuses.len()],
            ));
        }

        let index = SubmissionIndex::new(&submissions);
        assert_eq!(index.submitter_count(), 5);
        for u in 0..5 {
            let stats = index.stats_for(&format!("u{u}"));
            assert!(stats.accepted_problems_count <= stats.submitted_problems_count);
            assert!(stats.accepted_solutions_count <= stats.submitted_solutions_count);
        }
    }

    #[test]
    fn test_order_independent_and_idempotent() {
        let mut submissions = vec![
            submission("a", "u1", "S1", "accepted"),
            submission("b", "u1", "S1", "rejected"),
            submission("c", "u1", "Open Problem", "accepted"),
            submission("d", "u1", "S2", "accepted"),
        ];

        let first = aggregate(&submissions, "u1");
        let second = aggregate(&submissions, "u1");
        assert_eq!(first, second);

        submissions.reverse();
        assert_eq!(aggregate(&submissions, "u1"), first);
    }

    #[test]
    fn test_solution_numbers_sorted_and_deduplicated() {
        let submissions = vec![
            submission("a", "u1", "Problem 12", "accepted"),
            submission("b", "u1", "Problem 3", "rejected"),
            submission("c", "u1", "Problem 12 revised", "accepted"),
            submission("d", "u1", "Problems 4 and 5", "accepted"),
            submission("e", "u1", "Open Problem", "accepted"),
        ];

        let index = SubmissionIndex::new(&submissions);
        assert_eq!(index.solution_numbers("u1"), vec![3, 12]);
        assert!(index.solution_numbers("u2").is_empty());
    }
}
