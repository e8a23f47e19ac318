//! The `interviewer start` command.

use std::path::PathBuf;

use anyhow::Result;

use interviewer_core::model::{Difficulty, StartRequest};
use interviewer_core::traits::InterviewGateway;
use interviewer_gateway::{create_gateway, load_config_from};

use super::session;

pub async fn execute(
    name: Option<String>,
    email: Option<String>,
    position: String,
    difficulty: Option<Difficulty>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let candidate = config.candidate.clone();

    let request = StartRequest::new(
        name.or_else(|| candidate.as_ref().map(|c| c.name.clone()))
            .unwrap_or_default(),
        email
            .or_else(|| candidate.as_ref().map(|c| c.email.clone()))
            .unwrap_or_default(),
        position,
        difficulty.unwrap_or(config.default_difficulty),
    );
    request.validate()?;

    let gateway = create_gateway(&config)?;
    println!("Starting interview...");
    let handle = gateway.start_session(&request).await?;
    println!(
        "Interview #{} started: {} ({})",
        handle.interview_id, request.position, request.difficulty
    );

    let snapshot = gateway.fetch_session(handle.interview_id).await?;
    session::run(&gateway, snapshot, config.advance_delay()).await
}
