//! Submission data structure.

use serde::{Deserialize, Serialize};

/// Status literal the remote source uses for accepted submissions.
pub const ACCEPTED_STATUS: &str = "accepted";

/// Submitter id the remote source assigns to GDPR-erased accounts.
pub const GDPR_DELETED_USER_ID: &str = "98afae20-acd1-440c-ae2e-3716821f6024";

/// A submission fetched from the remote source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    /// Unique submission identifier
    pub id: String,

    /// Raw status value (only `accepted` is interpreted)
    pub status: String,

    /// Identifier of the owning submitter
    pub submitter_id: String,

    /// Project (category) name the submission was filed under
    pub project_name: String,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.status == ACCEPTED_STATUS
    }

    /// Whether the submission belongs to an erased account.
    pub fn is_from_deleted_user(&self) -> bool {
        self.submitter_id == GDPR_DELETED_USER_ID
    }
}
