//! Scripted in-memory gateway for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use interviewer_core::error::InterviewError;
use interviewer_core::model::{
    validate_email, HealthStatus, InterviewRecord, Question, QuestionId, Response, ResponseId,
    SessionHandle, SessionId, SessionSnapshot, SessionStatus, StartRequest, SubmitOutcome,
    SubmitRequest,
};
use interviewer_core::traits::{ensure_answer, InterviewGateway};

const QUESTION_TYPES: [&str; 5] = [
    "technical",
    "behavioral",
    "technical",
    "coding",
    "behavioral",
];

/// An in-memory stand-in for the interview service.
///
/// Sessions get a fixed number of generated questions. Answers are scored
/// from their word count so tests can predict the aggregate. Submitting a
/// second answer for the same question is rejected with a 409.
pub struct ScriptedGateway {
    questions_per_session: usize,
    store: Mutex<Store>,
    /// Error returned by the next submit instead of scoring it.
    next_submit_error: Mutex<Option<InterviewError>>,
    submit_count: AtomicU32,
    fetch_count: AtomicU32,
}

#[derive(Default)]
struct Store {
    sessions: Vec<SessionSnapshot>,
    next_question_id: i64,
    next_response_id: i64,
}

impl ScriptedGateway {
    /// Create a gateway whose sessions carry `questions_per_session` questions.
    pub fn new(questions_per_session: usize) -> Self {
        Self {
            questions_per_session,
            store: Mutex::new(Store::default()),
            next_submit_error: Mutex::new(None),
            submit_count: AtomicU32::new(0),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Make the next `submit_answer` call fail with `err`.
    pub fn fail_next_submit(&self, err: InterviewError) {
        *self.lock_error() = Some(err);
    }

    /// Insert a prepared snapshot, e.g. a malformed one.
    pub fn insert_session(&self, snapshot: SessionSnapshot) {
        self.lock_store().sessions.push(snapshot);
    }

    /// Number of `submit_answer` calls that reached the gateway.
    pub fn submit_count(&self) -> u32 {
        self.submit_count.load(Ordering::Relaxed)
    }

    /// Number of `fetch_session` calls.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_error(&self) -> std::sync::MutexGuard<'_, Option<InterviewError>> {
        self.next_submit_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

/// Word-count based score on a 0–10 scale, one decimal.
pub fn score_answer(text: &str) -> f64 {
    let words = text.split_whitespace().count() as f64;
    let raw = (2.0 + words * 0.5).min(10.0);
    (raw * 10.0).round() / 10.0
}

fn feedback_for(score: f64) -> String {
    if score >= 8.0 {
        "Thorough answer with good detail.".to_string()
    } else if score >= 5.0 {
        "Reasonable answer; add a concrete example.".to_string()
    } else {
        "Too brief; explain your reasoning.".to_string()
    }
}

#[async_trait]
impl InterviewGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn start_session(&self, request: &StartRequest) -> Result<SessionHandle, InterviewError> {
        request.validate()?;
        let mut store = self.lock_store();

        let id = SessionId::new(store.sessions.len() as i64 + 1);
        let mut questions = Vec::with_capacity(self.questions_per_session);
        for i in 0..self.questions_per_session {
            store.next_question_id += 1;
            questions.push(Question {
                id: QuestionId::new(store.next_question_id),
                question_type: QUESTION_TYPES
                    .get(i)
                    .copied()
                    .unwrap_or("technical")
                    .to_string(),
                question_text: format!(
                    "{} question {} for a {} role",
                    request.difficulty,
                    i + 1,
                    request.position
                ),
            });
        }

        let first_question = questions.first().cloned();
        store.sessions.push(SessionSnapshot {
            interview: InterviewRecord {
                id,
                candidate_name: Some(request.user_name.clone()),
                candidate_email: Some(request.email.clone()),
                position: request.position.clone(),
                difficulty: request.difficulty,
                status: SessionStatus::InProgress,
                score: None,
                started_at: Some(Utc::now()),
                completed_at: None,
            },
            questions,
            responses: Vec::new(),
        });

        Ok(SessionHandle {
            interview_id: id,
            first_question,
        })
    }

    async fn submit_answer(
        &self,
        request: &SubmitRequest,
    ) -> Result<SubmitOutcome, InterviewError> {
        ensure_answer(&request.response_text)?;
        self.submit_count.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = self.lock_error().take() {
            return Err(err);
        }

        let mut store = self.lock_store();
        store.next_response_id += 1;
        let response_id = ResponseId::new(store.next_response_id);

        let session = store
            .sessions
            .iter_mut()
            .find(|s| s.questions.iter().any(|q| q.id == request.question_id))
            .ok_or_else(|| InterviewError::service(Some(404), "Question not found"))?;

        if session.response_for(request.question_id).is_some() {
            return Err(InterviewError::service(Some(409), "question already answered"));
        }

        let score = score_answer(&request.response_text);
        let feedback = feedback_for(score);
        session.responses.push(Response {
            id: response_id,
            question_id: request.question_id,
            response_text: request.response_text.clone(),
            score: Some(score),
            feedback: feedback.clone(),
            created_at: Some(Utc::now()),
        });

        let position = session
            .questions
            .iter()
            .position(|q| q.id == request.question_id)
            .unwrap_or_default();
        let next_question = session.questions.get(position + 1).cloned();
        let completed = next_question.is_none();

        if completed {
            let scores: Vec<f64> = session.responses.iter().filter_map(|r| r.score).collect();
            let average = if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            };
            session.interview.status = SessionStatus::Completed;
            session.interview.score = Some(average);
            session.interview.completed_at = Some(Utc::now());
        }

        Ok(SubmitOutcome {
            score,
            feedback,
            completed,
            next_question,
        })
    }

    async fn fetch_session(&self, id: SessionId) -> Result<SessionSnapshot, InterviewError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.lock_store()
            .sessions
            .iter()
            .find(|s| s.id() == id)
            .cloned()
            .ok_or_else(|| InterviewError::service(Some(404), "Interview not found"))
    }

    async fn fetch_sessions_by_identity(
        &self,
        email: &str,
    ) -> Result<Vec<InterviewRecord>, InterviewError> {
        validate_email(email)?;
        // Newest first, like the service.
        Ok(self
            .lock_store()
            .sessions
            .iter()
            .rev()
            .filter(|s| s.interview.candidate_email.as_deref() == Some(email.trim()))
            .map(|s| s.interview.clone())
            .collect())
    }

    async fn health(&self) -> Result<HealthStatus, InterviewError> {
        Ok(HealthStatus {
            status: "healthy".into(),
        })
    }
}
