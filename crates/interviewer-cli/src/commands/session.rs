//! The interactive question loop shared by `start` and `resume`.

use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use interviewer_core::cycle::{Advance, CycleState, SubmissionCycle};
use interviewer_core::model::{SessionId, SessionSnapshot};
use interviewer_core::summary::project;
use interviewer_core::traits::InterviewGateway;

use super::results::print_summary;

/// Reads multi-line answers from stdin. An answer ends at a blank line.
struct AnswerReader {
    lines: Lines<BufReader<Stdin>>,
}

impl AnswerReader {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// `None` on end of input with nothing typed.
    async fn read_answer(&mut self) -> Result<Option<String>> {
        let mut answer: Vec<String> = Vec::new();
        loop {
            match self.lines.next_line().await? {
                Some(line) if line.trim().is_empty() => return Ok(Some(answer.join("\n"))),
                Some(line) => answer.push(line),
                None if answer.is_empty() => return Ok(None),
                None => return Ok(Some(answer.join("\n"))),
            }
        }
    }
}

/// Run the session until it completes, the input ends, or Ctrl-C.
///
/// A single interrupt future spans the whole loop, so Ctrl-C pauses the
/// session whether it is waiting for input, for the service, or for the
/// feedback delay.
pub async fn run(
    gateway: &dyn InterviewGateway,
    snapshot: SessionSnapshot,
    delay: Duration,
) -> Result<()> {
    let id = snapshot.id();
    let total = snapshot.questions.len();
    tracing::debug!(session = %id, gateway = gateway.name(), "running session");
    let mut cycle = SubmissionCycle::for_session(&snapshot)?.with_delay(delay);
    let mut reader = AnswerReader::new();
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        let (question, ordinal) = match cycle.state() {
            CycleState::Idle { question, ordinal } => (question.clone(), *ordinal),
            CycleState::Completed => break,
            other => anyhow::bail!("session view stopped in state {}", other.name()),
        };

        if cycle.last_error().is_none() {
            println!();
            println!("Question {ordinal} of {total} [{}]", question.question_type);
            println!("{}", question.question_text);
            println!("(finish your answer with an empty line)");
        }

        let input = tokio::select! {
            answer = reader.read_answer() => answer?,
            _ = &mut interrupt => None,
        };
        let Some(answer) = input else {
            pause(&mut cycle);
            return Ok(());
        };

        // A blank line right after a failed submit retries the kept draft.
        let answer = if answer.trim().is_empty() && cycle.last_error().is_some() {
            cycle.draft().to_string()
        } else {
            answer
        };

        println!("Evaluating your answer...");
        let submitted = tokio::select! {
            result = cycle.submit(gateway, answer) => Some(result),
            _ = &mut interrupt => None,
        };
        let Some(submitted) = submitted else {
            pause(&mut cycle);
            return Ok(());
        };

        match submitted {
            Ok(_) => {}
            Err(e) if e.is_input() => {
                println!("{e}");
                cycle.dismiss_error();
                continue;
            }
            Err(e) if e.is_data_integrity() => return Err(e.into()),
            Err(e) if e.is_conflict() => {
                println!("{e}. Reloading the interview...");
                let fresh = tokio::select! {
                    fresh = gateway.fetch_session(id) => Some(fresh?),
                    _ = &mut interrupt => None,
                };
                let Some(fresh) = fresh else {
                    pause(&mut cycle);
                    return Ok(());
                };
                cycle = SubmissionCycle::for_session(&fresh)?.with_delay(delay);
                continue;
            }
            Err(e) => {
                println!("Error: {e}");
                println!("Your answer was kept. Press Enter to resubmit it or type a new answer.");
                continue;
            }
        }

        if let CycleState::FeedbackVisible {
            score, feedback, ..
        } = cycle.state()
        {
            println!("Score: {score:.1}/10");
            println!("Feedback: {feedback}");
        }

        let advance = tokio::select! {
            advance = cycle.wait_and_advance() => Some(advance),
            _ = &mut interrupt => None,
        };
        match advance {
            Some(Ok(Advance::Next { .. })) | Some(Ok(Advance::Completed)) => {}
            Some(Ok(Advance::Stale)) => {
                tracing::debug!(session = %id, "advance was stale");
            }
            Some(Err(e)) => return Err(e.into()),
            None => {
                pause(&mut cycle);
                return Ok(());
            }
        }
    }

    tokio::select! {
        shown = show_summary(gateway, id) => shown,
        _ = &mut interrupt => {
            println!();
            println!("Interrupted. Show the results with: interviewer results --id {id}");
            Ok(())
        }
    }
}

/// Fetch the finished session and print its summary.
async fn show_summary(gateway: &dyn InterviewGateway, id: SessionId) -> Result<()> {
    println!("Loading results...");
    let snapshot = gateway.fetch_session(id).await?;
    let view = project(&snapshot);
    print_summary(&view);
    Ok(())
}

/// Tear the view down so nothing it scheduled can fire, then print the
/// resume hint.
fn pause(cycle: &mut SubmissionCycle) {
    cycle.cancel();
    let id = cycle.session_id();
    println!();
    println!("Interview paused. Continue with: interviewer resume --id {id}");
}
