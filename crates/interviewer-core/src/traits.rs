//! The gateway seam between the session flow and the interview service.
//!
//! Implemented by `interviewer-gateway` (HTTP and scripted in-memory).

use async_trait::async_trait;

use crate::error::InterviewError;
use crate::model::{
    HealthStatus, InterviewRecord, SessionHandle, SessionId, SessionSnapshot, StartRequest,
    SubmitOutcome, SubmitRequest,
};

/// Typed request/response boundary to the interview service.
///
/// Every call is a single attempt. Implementations never retry; failures are
/// returned to the caller as [`InterviewError`].
#[async_trait]
pub trait InterviewGateway: Send + Sync {
    /// Human-readable gateway name (e.g. "http").
    fn name(&self) -> &str;

    /// Start a new session. Validates the request before any network call.
    async fn start_session(&self, request: &StartRequest) -> Result<SessionHandle, InterviewError>;

    /// Submit an answer for a single question.
    async fn submit_answer(
        &self,
        request: &SubmitRequest,
    ) -> Result<SubmitOutcome, InterviewError>;

    /// Fetch a full session snapshot: questions and responses.
    async fn fetch_session(&self, id: SessionId) -> Result<SessionSnapshot, InterviewError>;

    /// List sessions belonging to `email`, in service order.
    async fn fetch_sessions_by_identity(
        &self,
        email: &str,
    ) -> Result<Vec<InterviewRecord>, InterviewError>;

    /// Liveness check.
    async fn health(&self) -> Result<HealthStatus, InterviewError>;
}

/// Reject blank answers locally; the service is never asked to score them.
pub fn ensure_answer(text: &str) -> Result<(), InterviewError> {
    if text.trim().is_empty() {
        Err(InterviewError::EmptyAnswer)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_answers_rejected() {
        assert_eq!(ensure_answer(""), Err(InterviewError::EmptyAnswer));
        assert_eq!(ensure_answer(" \n\t "), Err(InterviewError::EmptyAnswer));
        assert!(ensure_answer(" indexes speed up reads ").is_ok());
    }
}
