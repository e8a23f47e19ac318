//! Core data model types for interviewer.
//!
//! These mirror the records exchanged with the interview service. Sessions
//! are value snapshots: every command fetches a fresh one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| format!("invalid {}: '{s}'", stringify!($name)))
            }
        }
    };
}

id_type!(
    /// Identifier of an interview session.
    SessionId
);
id_type!(
    /// Identifier of a question within a session.
    QuestionId
);
id_type!(
    /// Identifier of a submitted response.
    ResponseId
);

/// Interview difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Lifecycle status reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::InProgress => write!(f, "in_progress"),
            SessionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Session header: everything about an interview except its questions and
/// responses. Also the element type of the history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: SessionId,
    /// Candidate name, when the service includes it.
    #[serde(default, alias = "user_name")]
    pub candidate_name: Option<String>,
    /// Candidate email, when the service includes it.
    #[serde(default, alias = "email")]
    pub candidate_email: Option<String>,
    pub position: String,
    pub difficulty: Difficulty,
    pub status: SessionStatus,
    /// Aggregate score; only meaningful once `status` is completed.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl InterviewRecord {
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// The aggregate score, hidden while the session is still running.
    pub fn final_score(&self) -> Option<f64> {
        if self.is_completed() {
            self.score
        } else {
            None
        }
    }
}

/// A single interview question. Its position is its index in
/// [`SessionSnapshot::questions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// Type tag such as "technical", "behavioral" or "coding".
    #[serde(default)]
    pub question_type: String,
    pub question_text: String,
}

/// A submitted answer together with the service's evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: ResponseId,
    pub question_id: QuestionId,
    pub response_text: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Full session snapshot as returned by `GET /interview/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub interview: InterviewRecord,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub questions: Vec<Question>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub responses: Vec<Response>,
}

impl SessionSnapshot {
    pub fn id(&self) -> SessionId {
        self.interview.id
    }

    /// The response recorded for `question_id`, if any.
    pub fn response_for(&self, question_id: QuestionId) -> Option<&Response> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }
}

/// The service encodes empty lists as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /interview/start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartRequest {
    pub user_name: String,
    pub email: String,
    pub position: String,
    pub difficulty: Difficulty,
}

impl StartRequest {
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        position: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            email: email.into(),
            position: position.into(),
            difficulty,
        }
    }

    /// Check required fields before anything goes over the wire.
    pub fn validate(&self) -> Result<(), crate::error::InterviewError> {
        use crate::error::InterviewError;

        if self.user_name.trim().is_empty() {
            return Err(InterviewError::Validation("candidate name is required".into()));
        }
        validate_email(&self.email)?;
        if self.position.trim().is_empty() {
            return Err(InterviewError::Validation("position is required".into()));
        }
        Ok(())
    }
}

/// Minimal email check shared by start and history lookups.
pub fn validate_email(email: &str) -> Result<(), crate::error::InterviewError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(crate::error::InterviewError::Validation(
            "email is required".into(),
        ));
    }
    if !email.contains('@') {
        return Err(crate::error::InterviewError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Response of `POST /interview/start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionHandle {
    pub interview_id: SessionId,
    /// First question, when the service sends it along.
    #[serde(default, rename = "question")]
    pub first_question: Option<Question>,
}

/// Body of `POST /interview/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub question_id: QuestionId,
    pub response_text: String,
}

/// Response of `POST /interview/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
    pub completed: bool,
    #[serde(default)]
    pub next_question: Option<Question>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}
