//! The `interviewer resume` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use interviewer_core::model::SessionId;
use interviewer_core::sequencer::progress;
use interviewer_core::traits::InterviewGateway;
use interviewer_gateway::{create_gateway, load_config_from};

use super::session;

pub async fn execute(id: i64, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let gateway = create_gateway(&config)?;
    let id = SessionId::new(id);

    println!("Loading interview #{id}...");
    let snapshot = gateway
        .fetch_session(id)
        .await
        .with_context(|| format!("failed to load interview {id}"))?;

    let p = progress(&snapshot);
    if !snapshot.interview.is_completed() {
        println!(
            "{}: {} of {} questions answered",
            snapshot.interview.position, p.answered, p.total
        );
    }

    session::run(&gateway, snapshot, config.advance_delay()).await
}
