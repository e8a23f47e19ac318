//! Submission cycle: the per-question submit → feedback → advance state machine.
//!
//! One [`SubmissionCycle`] is owned by one session view. After a successful
//! submission the controller shows feedback and schedules a single delayed
//! advance. The schedule lives in one slot guarded by a generation counter,
//! so a ticket that outlived its view (cancelled, superseded, or belonging to
//! another session) can never mutate state.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::InterviewError;
use crate::model::{Question, QuestionId, SessionId, SessionSnapshot, SubmitOutcome, SubmitRequest};
use crate::sequencer::{resume_point, ResumePoint};
use crate::traits::{ensure_answer, InterviewGateway};

/// Default time feedback stays on screen before advancing.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_secs(3);

/// Current state of a session view.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleState {
    /// Waiting for an answer to `question`.
    Idle { question: Question, ordinal: usize },
    /// An answer is on its way to the service.
    Submitting { question: Question, ordinal: usize },
    /// The service's evaluation is shown; an advance is scheduled.
    FeedbackVisible {
        question: Question,
        ordinal: usize,
        score: f64,
        feedback: String,
    },
    /// The scheduled advance is being applied.
    Advancing,
    /// Every question is answered; show the summary.
    Completed,
    /// The service sent data the view cannot act on.
    Aborted { message: String },
    /// The view was torn down.
    Cancelled,
}

impl CycleState {
    pub fn name(&self) -> &'static str {
        match self {
            CycleState::Idle { .. } => "idle",
            CycleState::Submitting { .. } => "submitting",
            CycleState::FeedbackVisible { .. } => "feedback",
            CycleState::Advancing => "advancing",
            CycleState::Completed => "completed",
            CycleState::Aborted { .. } => "aborted",
            CycleState::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CycleState::Completed | CycleState::Aborted { .. } | CycleState::Cancelled
        )
    }
}

/// Handle to a scheduled advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    session_id: SessionId,
    generation: u64,
}

impl AdvanceTicket {
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }
}

/// Result of firing an advance ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The ticket no longer matches the pending slot; nothing changed.
    Stale,
    /// The session is finished.
    Completed,
    /// The next question is now active.
    Next { question: Question, ordinal: usize },
}

#[derive(Debug)]
struct PendingAdvance {
    ticket: AdvanceTicket,
    deadline: Instant,
    answered: QuestionId,
    ordinal: usize,
    completed: bool,
    next_question: Option<Question>,
}

/// Per-session controller for the answer lifecycle.
#[derive(Debug)]
pub struct SubmissionCycle {
    session_id: SessionId,
    state: CycleState,
    draft: String,
    last_error: Option<String>,
    delay: Duration,
    generation: u64,
    pending: Option<PendingAdvance>,
}

impl SubmissionCycle {
    /// Start a cycle at `question`.
    pub fn new(session_id: SessionId, question: Question, ordinal: usize) -> Self {
        Self::with_state(session_id, CycleState::Idle { question, ordinal })
    }

    /// Build a cycle from a freshly loaded snapshot.
    ///
    /// Data-integrity problems (a session with no questions) are returned as
    /// errors so the caller can show an explicit error view.
    pub fn for_session(session: &SessionSnapshot) -> Result<Self, InterviewError> {
        let state = match resume_point(session)? {
            ResumePoint::Answer { question, ordinal } => CycleState::Idle { question, ordinal },
            ResumePoint::Summary => CycleState::Completed,
        };
        Ok(Self::with_state(session.id(), state))
    }

    fn with_state(session_id: SessionId, state: CycleState) -> Self {
        Self {
            session_id,
            state,
            draft: String::new(),
            last_error: None,
            delay: DEFAULT_ADVANCE_DELAY,
            generation: 0,
            pending: None,
        }
    }

    /// Override how long feedback stays visible.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    /// The answer text last submitted or typed. Kept after a failed submit.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Update the draft. Ignored unless the view is accepting input.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.accepts_input() {
            self.draft = text.into();
        }
    }

    /// Message to show the user, if the last action failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Whether submit controls are enabled.
    pub fn accepts_input(&self) -> bool {
        matches!(self.state, CycleState::Idle { .. })
    }

    /// The question on screen, with its ordinal.
    pub fn current_question(&self) -> Option<(&Question, usize)> {
        match &self.state {
            CycleState::Idle { question, ordinal }
            | CycleState::Submitting { question, ordinal }
            | CycleState::FeedbackVisible {
                question, ordinal, ..
            } => Some((question, *ordinal)),
            _ => None,
        }
    }

    /// The scheduled advance, if one is outstanding.
    pub fn pending_advance(&self) -> Option<(AdvanceTicket, Instant)> {
        self.pending.as_ref().map(|p| (p.ticket, p.deadline))
    }

    /// Submit `answer` for the active question.
    ///
    /// Blank answers are rejected without calling the gateway. On a gateway
    /// failure the view returns to `Idle` on the same question with the draft
    /// preserved. On success the feedback is shown and an advance is
    /// scheduled; the returned ticket identifies it. A view that has
    /// completed, aborted or been cancelled refuses with
    /// [`InterviewError::ViewClosed`] and keeps its last error.
    pub async fn submit(
        &mut self,
        gateway: &dyn InterviewGateway,
        answer: impl Into<String>,
    ) -> Result<AdvanceTicket, InterviewError> {
        let (question, ordinal) = match &self.state {
            CycleState::Idle { question, ordinal } => (question.clone(), *ordinal),
            state if state.is_terminal() => return Err(InterviewError::ViewClosed),
            _ => return Err(self.fail(InterviewError::SubmissionInProgress)),
        };

        self.draft = answer.into();
        if let Err(e) = ensure_answer(&self.draft) {
            return Err(self.fail(e));
        }

        tracing::debug!(session = %self.session_id, question = %question.id, "submitting answer");
        self.state = CycleState::Submitting {
            question: question.clone(),
            ordinal,
        };

        let request = SubmitRequest {
            question_id: question.id,
            response_text: self.draft.clone(),
        };

        match gateway.submit_answer(&request).await {
            Ok(outcome) => {
                self.last_error = None;
                let ticket = self.schedule(question.id, ordinal, &outcome);
                self.state = CycleState::FeedbackVisible {
                    question,
                    ordinal,
                    score: outcome.score,
                    feedback: outcome.feedback,
                };
                Ok(ticket)
            }
            Err(e) => {
                tracing::warn!(session = %self.session_id, error = %e, "answer submission failed");
                self.state = CycleState::Idle { question, ordinal };
                Err(self.fail(e))
            }
        }
    }

    fn schedule(
        &mut self,
        answered: QuestionId,
        ordinal: usize,
        outcome: &SubmitOutcome,
    ) -> AdvanceTicket {
        self.generation += 1;
        let ticket = AdvanceTicket {
            session_id: self.session_id,
            generation: self.generation,
        };
        self.pending = Some(PendingAdvance {
            ticket,
            deadline: Instant::now() + self.delay,
            answered,
            ordinal,
            completed: outcome.completed,
            next_question: outcome.next_question.clone(),
        });
        ticket
    }

    /// Apply the advance identified by `ticket`.
    ///
    /// Stale tickets (cancelled, superseded, or from another session) return
    /// [`Advance::Stale`] without touching state. A service result that is
    /// neither completed nor carries a next question aborts the view with
    /// [`InterviewError::InconsistentCompletion`].
    pub fn fire(&mut self, ticket: AdvanceTicket) -> Result<Advance, InterviewError> {
        let matches_slot = self.pending.as_ref().is_some_and(|p| p.ticket == ticket);
        if !matches_slot || !matches!(self.state, CycleState::FeedbackVisible { .. }) {
            tracing::debug!(
                session = %self.session_id,
                ticket_session = %ticket.session_id,
                "ignoring stale advance"
            );
            return Ok(Advance::Stale);
        }

        let Some(pending) = self.pending.take() else {
            return Ok(Advance::Stale);
        };
        self.state = CycleState::Advancing;

        if pending.completed {
            tracing::debug!(session = %self.session_id, "session completed");
            self.draft.clear();
            self.state = CycleState::Completed;
            return Ok(Advance::Completed);
        }

        match pending.next_question {
            Some(question) => {
                let ordinal = pending.ordinal + 1;
                tracing::debug!(session = %self.session_id, ordinal, "advancing to next question");
                self.draft.clear();
                self.state = CycleState::Idle {
                    question: question.clone(),
                    ordinal,
                };
                Ok(Advance::Next { question, ordinal })
            }
            None => {
                let err = InterviewError::InconsistentCompletion {
                    question_id: pending.answered,
                };
                tracing::warn!(session = %self.session_id, error = %err, "aborting session view");
                Err(self.abort(err))
            }
        }
    }

    /// Wait out the feedback delay, then apply the pending advance.
    ///
    /// Returns [`Advance::Stale`] immediately when nothing is scheduled.
    /// Dropping the returned future before the deadline leaves state as is.
    pub async fn wait_and_advance(&mut self) -> Result<Advance, InterviewError> {
        let Some((ticket, deadline)) = self.pending_advance() else {
            return Ok(Advance::Stale);
        };
        tokio::time::sleep_until(deadline).await;
        self.fire(ticket)
    }

    /// Tear the view down. Any outstanding ticket becomes stale.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.generation += 1;
        if !self.state.is_terminal() {
            tracing::debug!(
                session = %self.session_id,
                from = self.state.name(),
                "cycle cancelled"
            );
            self.state = CycleState::Cancelled;
        }
    }

    /// Move to the explicit error view for a data-integrity failure.
    pub fn abort(&mut self, err: InterviewError) -> InterviewError {
        self.pending = None;
        self.generation += 1;
        let message = err.to_string();
        self.last_error = Some(message.clone());
        self.state = CycleState::Aborted { message };
        err
    }

    fn fail(&mut self, err: InterviewError) -> InterviewError {
        self.last_error = Some(err.to_string());
        err
    }
}
