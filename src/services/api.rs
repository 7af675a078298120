// src/services/api.rs

//! Submittable API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::error::Result;
use crate::models::ApiConfig;
use crate::services::source::{
    PageRequest, SubmissionPage, SubmissionSource, SubmitterRecord, parse_page, parse_submitters,
};
use crate::utils::http::{create_async_client, read_success_body};

/// Listing filter sent with the first page request.
const ARCHIVED_STATUS_FILTER: &str = "either";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmittersRequest<'a> {
    submission_ids: &'a [String],
}

/// [`SubmissionSource`] backed by the Submittable REST API.
///
/// Every request authenticates with HTTP basic auth, using the API key as
/// the username and an empty password.
pub struct SubmittableClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SubmittableClient {
    /// Create a client for the configured API.
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = create_async_client(config)?;
        let base_url = Url::parse(&config.base_url)?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn page_query(request: &PageRequest) -> Vec<(&'static str, String)> {
        match request {
            PageRequest::First { page_size } => vec![
                ("size", page_size.to_string()),
                ("ArchivedStatus", ARCHIVED_STATUS_FILTER.to_string()),
            ],
            PageRequest::Continue(token) => vec![("continuationToken", token.clone())],
        }
    }
}

#[async_trait]
impl SubmissionSource for SubmittableClient {
    async fn list_submissions(&self, request: &PageRequest) -> Result<SubmissionPage> {
        let url = self.endpoint("submissions");
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some(""))
            .query(&Self::page_query(request))
            .send()
            .await?;

        let body = read_success_body(&url, response).await?;
        parse_page(&body)
    }

    async fn resolve_submitters(&self, submission_ids: &[String]) -> Result<Vec<SubmitterRecord>> {
        let url = self.endpoint("users/submissions/submitters");
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .json(&SubmittersRequest { submission_ids })
            .send()
            .await?;

        let body = read_success_body(&url, response).await?;
        parse_submitters(&body)
    }
}
