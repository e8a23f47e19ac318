//! The `interviewer results` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use interviewer_core::model::SessionId;
use interviewer_core::summary::{project, ScoreColor, SummaryView};
use interviewer_core::traits::InterviewGateway;
use interviewer_gateway::{create_gateway, load_config_from};
use interviewer_report::html::{generate_html, write_html_report};
use interviewer_report::markdown::{generate_markdown, write_markdown_report};
use interviewer_report::write_json_report;

pub async fn execute(
    id: i64,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let gateway = create_gateway(&config)?;

    let snapshot = gateway.fetch_session(SessionId::new(id)).await?;
    let view = project(&snapshot);

    match (format.as_str(), output) {
        ("json", Some(path)) => {
            write_json_report(&view, &path)?;
            println!("JSON report: {}", path.display());
        }
        ("json", None) => println!("{}", serde_json::to_string_pretty(&view)?),
        ("html", Some(path)) => {
            write_html_report(&view, &path)?;
            println!("HTML report: {}", path.display());
        }
        ("html", None) => println!("{}", generate_html(&view)),
        ("markdown" | "md", Some(path)) => {
            write_markdown_report(&view, &path)?;
            println!("Markdown report: {}", path.display());
        }
        ("markdown" | "md", None) => println!("{}", generate_markdown(&view)),
        ("text", _) => print_summary(&view),
        (other, _) => {
            anyhow::bail!("unknown format: {other} (expected text, json, html, markdown)")
        }
    }

    Ok(())
}

fn table_color(color: ScoreColor) -> Color {
    match color {
        ScoreColor::High => Color::Green,
        ScoreColor::Medium => Color::Yellow,
        ScoreColor::Low => Color::Red,
    }
}

/// Print a summary view as text with a per-question table.
pub fn print_summary(view: &SummaryView) {
    println!();
    println!("Interview Complete: {} ({})", view.position, view.difficulty);
    if let Some(name) = &view.candidate_name {
        println!("Candidate: {name}");
    }
    println!("Overall score: {:.1}/10 ({})", view.score, view.performance);

    let mut table = Table::new();
    table.set_header(vec!["#", "Type", "Question", "Score"]);
    for row in &view.rows {
        let score = match (row.score, row.score_color) {
            (Some(s), Some(c)) => Cell::new(format!("{s:.1}")).fg(table_color(c)),
            _ => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(row.ordinal),
            Cell::new(&row.question_type),
            Cell::new(&row.question_text),
            score,
        ]);
    }
    println!("\n{table}");

    for row in view.rows.iter().filter(|r| !r.missing_response) {
        println!("\nQuestion {}: {}", row.ordinal, row.question_text);
        println!("  Answer: {}", row.answer);
        println!("  Feedback: {}", row.feedback);
    }

    for w in &view.warnings {
        println!("Warning: {w}");
    }
}
