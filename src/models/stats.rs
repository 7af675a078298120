//! Per-submitter statistics.

use serde::{Deserialize, Serialize};

/// Submitted and accepted counts per category for one submitter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SubmitterStats {
    pub submitted_problems_count: usize,
    /// Distinct solution project names
    pub submitted_solutions_count: usize,
    pub accepted_problems_count: usize,
    pub accepted_solutions_count: usize,
}

impl SubmitterStats {
    /// Problems cell text, e.g. `2 of 3`.
    pub fn problems_label(&self) -> String {
        format!(
            "{} of {}",
            self.accepted_problems_count, self.submitted_problems_count
        )
    }

    /// Solutions cell text, e.g. `1 of 2`.
    pub fn solutions_label(&self) -> String {
        format!(
            "{} of {}",
            self.accepted_solutions_count, self.submitted_solutions_count
        )
    }
}
