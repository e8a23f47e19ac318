//! End-to-end session flow tests: gateway + sequencer + submission cycle +
//! summary projection, against a mocked HTTP service and the scripted gateway.

use std::time::Duration;

use interviewer_core::cycle::{Advance, CycleState, SubmissionCycle};
use interviewer_core::error::InterviewError;
use interviewer_core::model::{Difficulty, SessionId, SessionStatus, StartRequest};
use interviewer_core::sequencer::{next_actionable, NextAction};
use interviewer_core::summary::{project, PerformanceLevel};
use interviewer_core::traits::InterviewGateway;
use interviewer_gateway::{HttpGateway, ScriptedGateway};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DELAY: Duration = Duration::from_millis(10);

fn question(id: i64, kind: &str, text: &str) -> serde_json::Value {
    json!({"id": id, "interview_id": 77, "question_text": text, "question_type": kind})
}

/// Drive every remaining question of a session to completion.
async fn answer_all(gateway: &dyn InterviewGateway, id: SessionId) -> Vec<f64> {
    let snapshot = gateway.fetch_session(id).await.unwrap();
    let mut cycle = SubmissionCycle::for_session(&snapshot)
        .unwrap()
        .with_delay(DELAY);
    let mut scores = Vec::new();

    while let Some((question, _)) = cycle.current_question() {
        let answer = format!("My answer to: {}", question.question_text);
        cycle.submit(gateway, answer).await.unwrap();
        if let CycleState::FeedbackVisible { score, .. } = cycle.state() {
            scores.push(*score);
        }
        cycle.wait_and_advance().await.unwrap();
    }

    assert_eq!(cycle.state(), &CycleState::Completed);
    scores
}

#[tokio::test]
async fn e2e_three_questions_over_http() {
    let server = MockServer::start().await;
    let q1 = question(1, "technical", "How does an index work?");
    let q2 = question(2, "behavioral", "Describe a conflict you resolved.");
    let q3 = question(3, "technical", "What is backpressure?");

    let start_body = json!({
        "user_name": "Ada",
        "email": "ada@example.com",
        "position": "Backend Engineer",
        "difficulty": "medium"
    });
    let handle_body = json!({"interview_id": 77, "question": q1});
    Mock::given(method("POST"))
        .and(path("/interview/start"))
        .and(body_json(&start_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&handle_body))
        .expect(1)
        .mount(&server)
        .await;

    // Before any answer the session is fresh.
    let fresh = json!({
        "interview": {"id": 77, "position": "Backend Engineer", "difficulty": "medium",
                      "status": "in_progress"},
        "questions": [q1, q2, q3],
        "responses": null
    });
    Mock::given(method("GET"))
        .and(path("/interview/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fresh))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    for (qid, next, score, completed) in [
        (1, Some(q2.clone()), 7.0, false),
        (2, Some(q3.clone()), 8.0, false),
        (3, None, 6.0, true),
    ] {
        let mut body = json!({
            "feedback": format!("feedback {qid}"),
            "score": score,
            "completed": completed
        });
        if let Some(next) = next {
            body["next_question"] = next;
        }
        Mock::given(method("POST"))
            .and(path("/interview/submit"))
            .and(body_partial_json(json!({"question_id": qid})))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let gateway = HttpGateway::new(&server.uri(), 5).unwrap();
    let request = StartRequest::new(
        "Ada",
        "ada@example.com",
        "Backend Engineer",
        Difficulty::Medium,
    );
    let handle = gateway.start_session(&request).await.unwrap();
    assert_eq!(handle.interview_id, SessionId::new(77));

    let scores = answer_all(&gateway, handle.interview_id).await;
    assert_eq!(scores, vec![7.0, 8.0, 6.0]);

    // Final fetch: the service now reports completion and the aggregate.
    let finished = json!({
        "interview": {"id": 77, "position": "Backend Engineer", "difficulty": "medium",
                      "status": "completed", "score": 7.0},
        "questions": [q1, q2, q3],
        "responses": [
            {"id": 1, "question_id": 1, "response_text": "a1", "feedback": "feedback 1",
             "score": 7.0},
            {"id": 2, "question_id": 2, "response_text": "a2", "feedback": "feedback 2",
             "score": 8.0},
            {"id": 3, "question_id": 3, "response_text": "a3", "feedback": "feedback 3",
             "score": 6.0}
        ]
    });
    Mock::given(method("GET"))
        .and(path("/interview/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&finished))
        .mount(&server)
        .await;

    let snapshot = gateway.fetch_session(handle.interview_id).await.unwrap();
    assert_eq!(snapshot.interview.status, SessionStatus::Completed);
    assert_eq!(snapshot.interview.final_score(), Some(7.0));
    assert_eq!(next_actionable(&snapshot).unwrap(), NextAction::Completed);

    let view = project(&snapshot);
    assert_eq!(view.score, 7.0);
    assert_eq!(view.performance, PerformanceLevel::Good);
    assert!(view.warnings.is_empty());
}

#[tokio::test]
async fn e2e_scripted_session_matches_service_aggregate() {
    let gateway = ScriptedGateway::new(3);
    let request = StartRequest::new(
        "Ada",
        "ada@example.com",
        "Backend Engineer",
        Difficulty::Medium,
    );
    let handle = gateway.start_session(&request).await.unwrap();

    let scores = answer_all(&gateway, handle.interview_id).await;
    assert_eq!(scores.len(), 3);
    assert_eq!(gateway.submit_count(), 3);

    let snapshot = gateway.fetch_session(handle.interview_id).await.unwrap();
    assert_eq!(snapshot.interview.status, SessionStatus::Completed);
    let expected = scores.iter().sum::<f64>() / scores.len() as f64;
    assert_eq!(snapshot.interview.final_score(), Some(expected));
    assert_eq!(project(&snapshot).score, expected);
}

#[tokio::test]
async fn resume_picks_up_after_answered_questions() {
    let gateway = ScriptedGateway::new(3);
    let request = StartRequest::new("Ada", "ada@example.com", "SRE", Difficulty::Hard);
    let handle = gateway.start_session(&request).await.unwrap();

    // Answer the first question, then abandon the view mid-delay.
    let snapshot = gateway.fetch_session(handle.interview_id).await.unwrap();
    let mut cycle = SubmissionCycle::for_session(&snapshot).unwrap();
    let ticket = cycle.submit(&gateway, "first answer").await.unwrap();
    cycle.cancel();
    assert_eq!(cycle.fire(ticket).unwrap(), Advance::Stale);

    // A fresh view resumes at question 2.
    let snapshot = gateway.fetch_session(handle.interview_id).await.unwrap();
    let cycle = SubmissionCycle::for_session(&snapshot).unwrap();
    assert!(matches!(cycle.state(), CycleState::Idle { ordinal: 2, .. }));
}

#[tokio::test]
async fn service_failure_then_manual_retry() {
    let gateway = ScriptedGateway::new(1);
    let request = StartRequest::new("Ada", "ada@example.com", "SRE", Difficulty::Easy);
    let handle = gateway.start_session(&request).await.unwrap();
    let snapshot = gateway.fetch_session(handle.interview_id).await.unwrap();
    let mut cycle = SubmissionCycle::for_session(&snapshot)
        .unwrap()
        .with_delay(DELAY);

    let failure = InterviewError::service(Some(500), "Failed to evaluate answer");
    gateway.fail_next_submit(failure);
    let err = cycle.submit(&gateway, "retry me").await.unwrap_err();
    assert!(!err.is_data_integrity());
    assert_eq!(cycle.draft(), "retry me");
    assert!(matches!(cycle.state(), CycleState::Idle { ordinal: 1, .. }));

    let draft = cycle.draft().to_string();
    cycle.submit(&gateway, draft).await.unwrap();
    assert_eq!(cycle.wait_and_advance().await.unwrap(), Advance::Completed);
}

#[tokio::test]
async fn session_without_questions_is_reported() {
    let server = MockServer::start().await;

    let empty = json!({
        "interview": {"id": 5, "position": "SRE", "difficulty": "easy",
                      "status": "in_progress"},
        "questions": null,
        "responses": null
    });
    Mock::given(method("GET"))
        .and(path("/interview/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&empty))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(&server.uri(), 5).unwrap();
    let snapshot = gateway.fetch_session(SessionId::new(5)).await.unwrap();

    let err = SubmissionCycle::for_session(&snapshot).unwrap_err();
    assert_eq!(
        err,
        InterviewError::EmptySession {
            session_id: SessionId::new(5)
        }
    );
}
