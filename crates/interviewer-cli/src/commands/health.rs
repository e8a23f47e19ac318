//! The `interviewer health` command.

use std::path::PathBuf;

use anyhow::Result;

use interviewer_core::traits::InterviewGateway;
use interviewer_gateway::{create_gateway, load_config_from};

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let gateway = create_gateway(&config)?;

    let status = gateway.health().await?;
    if !status.is_healthy() {
        anyhow::bail!(
            "service at {} reported status '{}'",
            gateway.base_url(),
            status.status
        );
    }

    println!("Service at {} is {}", gateway.base_url(), status.status);
    Ok(())
}
