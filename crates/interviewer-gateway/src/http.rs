//! HTTP gateway to the interview service.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::instrument;

use interviewer_core::error::InterviewError;
use interviewer_core::model::{
    validate_email, HealthStatus, InterviewRecord, SessionHandle, SessionId, SessionSnapshot,
    StartRequest, SubmitOutcome, SubmitRequest,
};
use interviewer_core::traits::{ensure_answer, InterviewGateway};

use crate::error::{status_error, transport_error};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// reqwest-backed [`InterviewGateway`].
pub struct HttpGateway {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let base = if base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url.trim()
        };

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, InterviewError> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&e, self.timeout_secs))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = status_error(status, &body);
            tracing::debug!(status, error = %err, "service returned an error");
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            InterviewError::service(Some(status), format!("failed to parse response: {e}"))
        })
    }
}

#[async_trait]
impl InterviewGateway for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(
        skip(self, request),
        fields(position = %request.position, difficulty = %request.difficulty)
    )]
    async fn start_session(&self, request: &StartRequest) -> Result<SessionHandle, InterviewError> {
        request.validate()?;
        let handle: SessionHandle = self
            .send(self.client.post(self.url("/interview/start")).json(request))
            .await?;
        tracing::info!(session = %handle.interview_id, "session started");
        Ok(handle)
    }

    #[instrument(skip(self, request), fields(question = %request.question_id))]
    async fn submit_answer(
        &self,
        request: &SubmitRequest,
    ) -> Result<SubmitOutcome, InterviewError> {
        ensure_answer(&request.response_text)?;
        self.send(self.client.post(self.url("/interview/submit")).json(request))
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_session(&self, id: SessionId) -> Result<SessionSnapshot, InterviewError> {
        self.send(self.client.get(self.url(&format!("/interview/{id}"))))
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_sessions_by_identity(
        &self,
        email: &str,
    ) -> Result<Vec<InterviewRecord>, InterviewError> {
        validate_email(email)?;
        // The service encodes "no sessions" as `null`.
        let records: Option<Vec<InterviewRecord>> = self
            .send(
                self.client
                    .get(self.url("/interviews"))
                    .query(&[("email", email.trim())]),
            )
            .await?;
        Ok(records.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<HealthStatus, InterviewError> {
        self.send(self.client.get(self.url("/health"))).await
    }
}
