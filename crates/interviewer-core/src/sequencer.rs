//! Question sequencing: which question is next, if any.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::InterviewError;
use crate::model::{Question, QuestionId, SessionSnapshot};

/// What the session view should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum NextAction {
    /// Present `question`; `ordinal` is its 1-based position in the session.
    Question { question: Question, ordinal: usize },
    /// Every question has a response.
    Completed,
}

/// Where to land when a session is opened.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumePoint {
    /// Continue answering at this question.
    Answer { question: Question, ordinal: usize },
    /// Show the summary.
    Summary,
}

/// Aggregated view of session progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// Find the earliest unanswered question.
///
/// Questions are scanned in service order; the first one with no matching
/// response is active. A session with no questions at all is invalid and is
/// reported as [`InterviewError::EmptySession`] rather than as completed.
pub fn next_actionable(session: &SessionSnapshot) -> Result<NextAction, InterviewError> {
    if session.questions.is_empty() {
        return Err(InterviewError::EmptySession {
            session_id: session.id(),
        });
    }

    warn_on_stray_responses(session);
    let answered = answered_ids(session);
    let next = session
        .questions
        .iter()
        .enumerate()
        .find(|(_, q)| !answered.contains(&q.id));

    Ok(match next {
        Some((index, question)) => NextAction::Question {
            question: question.clone(),
            ordinal: index + 1,
        },
        None => NextAction::Completed,
    })
}

/// Decide the landing point for a freshly loaded session.
///
/// The service's status is authoritative: a session it reports as completed
/// goes straight to the summary even if the response count disagrees.
pub fn resume_point(session: &SessionSnapshot) -> Result<ResumePoint, InterviewError> {
    let next = next_actionable(session)?;

    if session.interview.is_completed() {
        if let NextAction::Question { ordinal, .. } = &next {
            tracing::warn!(
                session = %session.id(),
                ordinal,
                "service reports session completed but question is unanswered"
            );
        }
        return Ok(ResumePoint::Summary);
    }

    Ok(match next {
        NextAction::Question { question, ordinal } => ResumePoint::Answer { question, ordinal },
        NextAction::Completed => {
            tracing::warn!(
                session = %session.id(),
                "all questions answered but service status is still in progress"
            );
            ResumePoint::Summary
        }
    })
}

/// Count answered and remaining questions.
pub fn progress(session: &SessionSnapshot) -> SessionProgress {
    let answered_set = answered_ids(session);
    let total = session.questions.len();
    let answered = session
        .questions
        .iter()
        .filter(|q| answered_set.contains(&q.id))
        .count();

    SessionProgress {
        total,
        answered,
        remaining: total - answered,
        is_complete: total > 0 && answered == total,
    }
}

/// Ids of questions that have a response. Responses to unknown questions are
/// ignored.
fn answered_ids(session: &SessionSnapshot) -> HashSet<QuestionId> {
    let known: HashSet<QuestionId> = session.questions.iter().map(|q| q.id).collect();
    session
        .responses
        .iter()
        .map(|r| r.question_id)
        .filter(|id| known.contains(id))
        .collect()
}

/// Log duplicate responses and responses to questions outside the session.
fn warn_on_stray_responses(session: &SessionSnapshot) {
    let known: HashSet<QuestionId> = session.questions.iter().map(|q| q.id).collect();
    let mut seen = HashSet::with_capacity(session.responses.len());

    for response in &session.responses {
        if !known.contains(&response.question_id) {
            tracing::warn!(
                session = %session.id(),
                question = %response.question_id,
                "response references a question outside this session"
            );
        } else if !seen.insert(response.question_id) {
            tracing::warn!(
                session = %session.id(),
                question = %response.question_id,
                "duplicate response for question"
            );
        }
    }
}
