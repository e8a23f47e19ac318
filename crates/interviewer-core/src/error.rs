//! Client error taxonomy.
//!
//! Defined in `interviewer-core` so the submission cycle can classify gateway
//! failures (keep state and retry vs. abort the view) without string matching.

use thiserror::Error;

use crate::model::{QuestionId, SessionId};

/// Errors surfaced by the gateway and by the session flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterviewError {
    /// Missing or invalid required input, or a 400 from the service.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The trimmed answer text was empty.
    #[error("please provide an answer")]
    EmptyAnswer,

    /// Transport failure or non-2xx response from the service.
    #[error("{message}")]
    Service {
        status: Option<u16>,
        message: String,
    },

    /// The service returned a session without any questions.
    #[error("session {session_id} has no questions")]
    EmptySession { session_id: SessionId },

    /// The service reported `completed = false` without a next question.
    #[error("service reported question {question_id} as not final but sent no next question")]
    InconsistentCompletion { question_id: QuestionId },

    /// A submission was attempted while another one is still in flight or
    /// its feedback is being shown.
    #[error("an answer is already being submitted")]
    SubmissionInProgress,

    /// The view has completed, aborted or been torn down and takes no more
    /// answers.
    #[error("this session view is closed")]
    ViewClosed,
}

impl InterviewError {
    pub fn service(status: Option<u16>, message: impl Into<String>) -> Self {
        InterviewError::Service {
            status,
            message: message.into(),
        }
    }

    /// Returns `true` for errors that mean the service sent data the client
    /// cannot act on. These abort the current view.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            InterviewError::EmptySession { .. } | InterviewError::InconsistentCompletion { .. }
        )
    }

    /// Returns `true` for errors resolved in place without a state change.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            InterviewError::Validation(_)
                | InterviewError::EmptyAnswer
                | InterviewError::SubmissionInProgress
        )
    }

    /// Returns `true` when the service rejected the request as a conflict,
    /// e.g. a second answer for an already answered question.
    pub fn is_conflict(&self) -> bool {
        matches!(self, InterviewError::Service { status: Some(409), .. })
    }
}
