//! HTTP client for the contact endpoint of a running server.

use std::time::Duration;

use folio_models::contact::{ContactForm, SubmissionResponse};
use folio_utils::folio_version;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    url: Url,
}

#[derive(Debug, Error)]
pub enum ContactClientError {
    #[error("Request to the contact endpoint failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Contact endpoint responded with unexpected status {0}")]
    UnexpectedStatus(StatusCode),
}

impl ContactClient {
    pub fn new(url: Url) -> Result<Self, ContactClientError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("folio/{}", folio_version()))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, url })
    }

    /// Submit the form as-is. The server validates it again, so rejections
    /// are reported through the returned response rather than as an error.
    pub async fn submit(
        &self,
        form: &ContactForm,
    ) -> Result<SubmissionResponse, ContactClientError> {
        debug!(url = %self.url, "submitting contact form");

        let response = self.http.post(self.url.clone()).json(form).send().await?;

        match response.status() {
            StatusCode::OK
            | StatusCode::UNPROCESSABLE_ENTITY
            | StatusCode::INTERNAL_SERVER_ERROR => Ok(response.json().await?),
            status => Err(ContactClientError::UnexpectedStatus(status)),
        }
    }
}
