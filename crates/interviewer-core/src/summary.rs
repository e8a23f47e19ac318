//! Session summary projection: the report view-model of a finished session.

use std::fmt;

use serde::Serialize;

use crate::model::{Difficulty, QuestionId, SessionId, SessionSnapshot, SessionStatus};

/// Qualitative label for an aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl PerformanceLevel {
    /// Tiers are inclusive at their lower bound: 8, 6 and 4.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            PerformanceLevel::Excellent
        } else if score >= 6.0 {
            PerformanceLevel::Good
        } else if score >= 4.0 {
            PerformanceLevel::Fair
        } else {
            PerformanceLevel::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Fair => "Fair",
            PerformanceLevel::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display color for a score. Breakpoints at 8 and 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    High,
    Medium,
    Low,
}

impl ScoreColor {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreColor::High
        } else if score >= 6.0 {
            ScoreColor::Medium
        } else {
            ScoreColor::Low
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreColor::High => "score-high",
            ScoreColor::Medium => "score-medium",
            ScoreColor::Low => "score-low",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ScoreColor::High => "#00ff41",
            ScoreColor::Medium => "#ffff00",
            ScoreColor::Low => "#ff4444",
        }
    }
}

/// One question of the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub ordinal: usize,
    pub question_id: QuestionId,
    pub question_type: String,
    pub question_text: String,
    /// Empty when the question has no response.
    pub answer: String,
    pub feedback: String,
    pub score: Option<f64>,
    pub score_color: Option<ScoreColor>,
    /// `true` when no response exists for this question.
    pub missing_response: bool,
}

/// Report view-model for a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub session_id: SessionId,
    pub candidate_name: Option<String>,
    pub position: String,
    pub difficulty: Difficulty,
    pub status: SessionStatus,
    /// Aggregate score as reported by the service; 0.0 when absent.
    pub score: f64,
    pub performance: PerformanceLevel,
    pub color: ScoreColor,
    pub rows: Vec<SummaryRow>,
    /// Data-integrity notes, e.g. questions without a response.
    pub warnings: Vec<String>,
}

impl SummaryView {
    pub fn answered(&self) -> usize {
        self.rows.iter().filter(|r| !r.missing_response).count()
    }
}

/// Project a session snapshot into its summary view.
///
/// Questions are paired with responses by id. A question without a response
/// becomes an empty-answer row plus a warning; it never fails the projection.
pub fn project(session: &SessionSnapshot) -> SummaryView {
    let interview = &session.interview;
    let score = interview.score.unwrap_or(0.0);
    let mut warnings = Vec::new();

    if !interview.is_completed() {
        warnings.push(format!("session {} is still in progress", interview.id));
    }

    let rows = session
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let ordinal = index + 1;
            match session.response_for(question.id) {
                Some(response) => SummaryRow {
                    ordinal,
                    question_id: question.id,
                    question_type: question.question_type.clone(),
                    question_text: question.question_text.clone(),
                    answer: response.response_text.clone(),
                    feedback: response.feedback.clone(),
                    score: response.score,
                    score_color: response.score.map(ScoreColor::from_score),
                    missing_response: false,
                },
                None => {
                    if interview.is_completed() {
                        tracing::warn!(
                            session = %interview.id,
                            question = %question.id,
                            "completed session has a question without a response"
                        );
                    }
                    warnings.push(format!("question {ordinal} has no response"));
                    SummaryRow {
                        ordinal,
                        question_id: question.id,
                        question_type: question.question_type.clone(),
                        question_text: question.question_text.clone(),
                        answer: String::new(),
                        feedback: String::new(),
                        score: None,
                        score_color: None,
                        missing_response: true,
                    }
                }
            }
        })
        .collect();

    SummaryView {
        session_id: interview.id,
        candidate_name: interview.candidate_name.clone(),
        position: interview.position.clone(),
        difficulty: interview.difficulty,
        status: interview.status,
        score,
        performance: PerformanceLevel::from_score(score),
        color: ScoreColor::from_score(score),
        rows,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InterviewRecord, Question, Response, ResponseId};

    fn snapshot(score: Option<f64>, answered: &[i64]) -> SessionSnapshot {
        SessionSnapshot {
            interview: InterviewRecord {
                id: SessionId::new(3),
                candidate_name: Some("Ada".into()),
                candidate_email: None,
                position: "Backend Engineer".into(),
                difficulty: Difficulty::Medium,
                status: SessionStatus::Completed,
                score,
                started_at: None,
                completed_at: None,
            },
            questions: (1..=3)
                .map(|id| Question {
                    id: QuestionId::new(id),
                    question_type: "technical".into(),
                    question_text: format!("Q{id}"),
                })
                .collect(),
            responses: answered
                .iter()
                .map(|&qid| Response {
                    id: ResponseId::new(qid + 100),
                    question_id: QuestionId::new(qid),
                    response_text: format!("A{qid}"),
                    score: Some(qid as f64 * 3.0),
                    feedback: format!("F{qid}"),
                    created_at: None,
                })
                .collect(),
        }
    }

    #[test]
    fn performance_tiers_are_lower_bound_inclusive() {
        assert_eq!(PerformanceLevel::from_score(8.0).label(), "Excellent");
        assert_eq!(PerformanceLevel::from_score(6.0).label(), "Good");
        assert_eq!(PerformanceLevel::from_score(4.0).label(), "Fair");
        assert_eq!(PerformanceLevel::from_score(3.9).label(), "Needs Improvement");
        assert_eq!(PerformanceLevel::from_score(10.0), PerformanceLevel::Excellent);
        assert_eq!(PerformanceLevel::from_score(7.99), PerformanceLevel::Good);
    }

    #[test]
    fn color_breakpoints() {
        assert_eq!(ScoreColor::from_score(8.0), ScoreColor::High);
        assert_eq!(ScoreColor::from_score(6.0), ScoreColor::Medium);
        assert_eq!(ScoreColor::from_score(5.9), ScoreColor::Low);
        assert_eq!(ScoreColor::from_score(4.0), ScoreColor::Low);
        assert_eq!(ScoreColor::High.hex(), "#00ff41");
    }

    #[test]
    fn rows_follow_question_order() {
        let view = project(&snapshot(Some(6.5), &[3, 1, 2]));

        assert_eq!(view.score, 6.5);
        assert_eq!(view.performance, PerformanceLevel::Good);
        assert_eq!(view.color, ScoreColor::Medium);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[0].question_text, "Q1");
        assert_eq!(view.rows[0].answer, "A1");
        assert_eq!(view.rows[2].ordinal, 3);
        assert_eq!(view.rows[2].score, Some(9.0));
        assert_eq!(view.rows[2].score_color, Some(ScoreColor::High));
        assert!(view.warnings.is_empty());
        assert_eq!(view.answered(), 3);
    }

    #[test]
    fn missing_response_renders_empty_row() {
        let view = project(&snapshot(Some(8.0), &[1, 3]));

        let row = &view.rows[1];
        assert!(row.missing_response);
        assert!(row.answer.is_empty());
        assert_eq!(row.score, None);
        assert_eq!(view.warnings, vec!["question 2 has no response".to_string()]);
        assert_eq!(view.answered(), 2);
    }

    #[test]
    fn absent_score_treated_as_zero() {
        let view = project(&snapshot(None, &[1, 2, 3]));
        assert_eq!(view.score, 0.0);
        assert_eq!(view.performance, PerformanceLevel::NeedsImprovement);
        assert_eq!(view.color, ScoreColor::Low);
    }
}
