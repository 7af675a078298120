// src/services/source.rs

//! Remote submission source abstraction and its wire records.
//!
//! Everything downstream of the fetchers works on [`Submission`] and
//! [`Submitter`]; only this module knows what the remote payloads look like.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{PLACEHOLDER, Submission, Submitter};

/// Which page of the submission listing to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// Initial request carrying the page size and listing filter
    First { page_size: usize },
    /// Follow-up request carrying the token returned with the previous page
    Continue(String),
}

/// One page of the submission listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPage {
    /// Token for the next page; empty when there are no more pages
    pub continuation_token: String,
    pub items: Vec<SubmissionRecord>,
}

impl SubmissionPage {
    pub fn is_last(&self) -> bool {
        self.continuation_token.is_empty()
    }
}

/// A submission as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub submission_id: String,
    pub submission_status: String,
    pub submitter_id: String,
    pub project_title: String,
}

impl TryFrom<SubmissionRecord> for Submission {
    type Error = AppError;

    fn try_from(record: SubmissionRecord) -> Result<Self> {
        if record.submission_id.trim().is_empty() {
            return Err(AppError::remote_data(
                "submission record",
                "empty submissionId",
            ));
        }
        if record.submitter_id.trim().is_empty() {
            return Err(AppError::remote_data(
                "submission record",
                format!("empty submitterId on submission {}", record.submission_id),
            ));
        }

        Ok(Submission {
            id: record.submission_id,
            status: record.submission_status,
            submitter_id: record.submitter_id,
            project_name: record.project_title,
        })
    }
}

/// A submitter profile fragment as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitterRecord {
    pub user_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<AddressRecord>,
}

/// Address part of a submitter profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    #[serde(default)]
    pub country_name: Option<String>,
    /// Country code
    #[serde(default)]
    pub country: Option<String>,
}

impl TryFrom<SubmitterRecord> for Submitter {
    type Error = AppError;

    fn try_from(record: SubmitterRecord) -> Result<Self> {
        if record.user_id.trim().is_empty() {
            return Err(AppError::remote_data("submitter record", "empty userId"));
        }

        let or_placeholder = |value: Option<String>| value.unwrap_or_else(|| PLACEHOLDER.into());
        let address = record.address.unwrap_or_default();

        Ok(Submitter {
            id: record.user_id,
            first_name: or_placeholder(record.first_name),
            last_name: or_placeholder(record.last_name),
            country_name: or_placeholder(address.country_name),
            country_code: or_placeholder(address.country),
        })
    }
}

/// Paginated submission listing plus batched submitter lookup.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    /// Fetch one page of the submission listing.
    async fn list_submissions(&self, request: &PageRequest) -> Result<SubmissionPage>;

    /// Resolve the submitters owning the given submissions.
    ///
    /// Callers never pass more than [`crate::models::MAX_BATCH_SIZE`] ids.
    async fn resolve_submitters(&self, submission_ids: &[String]) -> Result<Vec<SubmitterRecord>>;
}

/// Decode a submission listing page.
pub fn parse_page(body: &str) -> Result<SubmissionPage> {
    serde_json::from_str(body).map_err(|e| AppError::remote_data("submissions page", e))
}

/// Decode a submitter lookup response.
pub fn parse_submitters(body: &str) -> Result<Vec<SubmitterRecord>> {
    serde_json::from_str(body).map_err(|e| AppError::remote_data("submitters response", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        let page = parse_page(
            r#"{
                "continuationToken": "abc",
                "items": [{
                    "submissionId": "s1",
                    "submissionStatus": "accepted",
                    "submitterId": "u1",
                    "projectTitle": "Problem 12",
                    "extraField": 7
                }]
            }"#,
        )
        .unwrap();

        assert!(!page.is_last());
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].project_title, "Problem 12");
    }

    #[test]
    fn test_parse_page_missing_token_is_remote_data_error() {
        let err = parse_page(r#"{"items": []}"#).unwrap_err();
        assert!(err.is_remote_data());
    }

    #[test]
    fn test_parse_page_missing_item_field_is_remote_data_error() {
        let err = parse_page(
            r#"{"continuationToken": "", "items": [{"submissionId": "s1", "submitterId": "u1", "projectTitle": "P"}]}"#,
        )
        .unwrap_err();
        assert!(err.is_remote_data());
    }

    #[test]
    fn test_parse_page_null_token_is_remote_data_error() {
        let err = parse_page(r#"{"continuationToken": null, "items": []}"#).unwrap_err();
        assert!(err.is_remote_data());
    }

    #[test]
    fn test_empty_submission_id_rejected() {
        let record = SubmissionRecord {
            submission_id: " ".to_string(),
            submission_status: "accepted".to_string(),
            submitter_id: "u1".to_string(),
            project_title: "P".to_string(),
        };
        assert!(Submission::try_from(record).unwrap_err().is_remote_data());
    }

    #[test]
    fn test_submitter_missing_fields_become_placeholders() {
        let records = parse_submitters(
            r#"[
                {"userId": "u1", "firstName": "Emmy", "lastName": "Noether",
                 "address": {"countryName": "Germany", "country": "DE"}},
                {"userId": "u2", "firstName": null},
                {"userId": "u3", "lastName": "Euler", "address": {}}
            ]"#,
        )
        .unwrap();

        let submitters: Vec<Submitter> = records
            .into_iter()
            .map(|r| Submitter::try_from(r).unwrap())
            .collect();

        assert_eq!(submitters[0].country_with_code(), "Germany (DE)");
        assert_eq!(submitters[1], Submitter::unknown("u2"));
        assert_eq!(submitters[2].last_name, "Euler");
        assert_eq!(submitters[2].first_name, PLACEHOLDER);
        assert_eq!(submitters[2].country_code, PLACEHOLDER);
    }

    #[test]
    fn test_submitter_without_user_id_rejected() {
        let err = parse_submitters(r#"[{"firstName": "Anon"}]"#).unwrap_err();
        assert!(err.is_remote_data());
    }
}
