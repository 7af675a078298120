// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::Response;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;

/// Longest response body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ApiConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Read a response body, failing on any non-success status.
pub async fn read_success_body(url: &str, response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AppError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
            body: truncate(&body, MAX_ERROR_BODY_CHARS),
        });
    }
    Ok(body)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
