//! The `interviewer history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use interviewer_core::history::{project_history, HistoryAction};
use interviewer_core::traits::InterviewGateway;
use interviewer_gateway::{create_gateway, load_config_from};

pub async fn execute(email: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let email = email
        .or_else(|| config.candidate.as_ref().map(|c| c.email.clone()))
        .unwrap_or_default();

    let gateway = create_gateway(&config)?;
    let records = gateway.fetch_sessions_by_identity(&email).await?;
    let rows = project_history(&records);

    if rows.is_empty() {
        println!("No interviews found for {}.", email.trim());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Position",
        "Difficulty",
        "Status",
        "Started",
        "Score",
        "Next",
    ]);

    for row in &rows {
        let next = match row.action {
            HistoryAction::ViewResults(id) => format!("interviewer results --id {id}"),
            HistoryAction::Continue(id) => format!("interviewer resume --id {id}"),
        };
        table.add_row(vec![
            Cell::new(row.session_id),
            Cell::new(&row.position),
            Cell::new(row.difficulty),
            Cell::new(row.status),
            Cell::new(
                row.started_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(
                row.score
                    .map(|s| format!("{s:.1}"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(next),
        ]);
    }

    println!("{table}");
    Ok(())
}
