//! History listing: one row per past session and where selecting it leads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Difficulty, InterviewRecord, SessionId, SessionStatus};
use crate::summary::ScoreColor;

/// Navigation target for a history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "session_id", rename_all = "snake_case")]
pub enum HistoryAction {
    ViewResults(SessionId),
    Continue(SessionId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub session_id: SessionId,
    pub position: String,
    pub difficulty: Difficulty,
    pub status: SessionStatus,
    pub started_at: Option<DateTime<Utc>>,
    /// Only set for completed sessions.
    pub score: Option<f64>,
    pub score_color: Option<ScoreColor>,
    pub action: HistoryAction,
}

/// Map service records to rows, keeping service order.
pub fn project_history(records: &[InterviewRecord]) -> Vec<HistoryRow> {
    records
        .iter()
        .map(|record| {
            let score = record.final_score();
            let action = if record.is_completed() {
                HistoryAction::ViewResults(record.id)
            } else {
                HistoryAction::Continue(record.id)
            };
            HistoryRow {
                session_id: record.id,
                position: record.position.clone(),
                difficulty: record.difficulty,
                status: record.status,
                started_at: record.started_at,
                score,
                score_color: score.map(ScoreColor::from_score),
                action,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, status: SessionStatus, score: Option<f64>) -> InterviewRecord {
        InterviewRecord {
            id: SessionId::new(id),
            candidate_name: None,
            candidate_email: Some("ada@example.com".into()),
            position: format!("Role {id}"),
            difficulty: Difficulty::Medium,
            status,
            score,
            started_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn actions_follow_status_and_order_is_kept() {
        let rows = project_history(&[
            record(9, SessionStatus::InProgress, None),
            record(4, SessionStatus::Completed, Some(8.4)),
        ]);

        assert_eq!(rows[0].session_id, SessionId::new(9));
        assert_eq!(rows[0].action, HistoryAction::Continue(SessionId::new(9)));
        assert_eq!(rows[0].score, None);

        assert_eq!(rows[1].action, HistoryAction::ViewResults(SessionId::new(4)));
        assert_eq!(rows[1].score, Some(8.4));
        assert_eq!(rows[1].score_color, Some(ScoreColor::High));
    }

    #[test]
    fn in_progress_score_is_hidden() {
        let rows = project_history(&[record(1, SessionStatus::InProgress, Some(5.0))]);
        assert_eq!(rows[0].score, None);
        assert_eq!(rows[0].score_color, None);
    }
}
