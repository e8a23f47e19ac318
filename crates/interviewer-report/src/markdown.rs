//! Markdown report generator.

use anyhow::Result;
use std::path::Path;

use interviewer_core::summary::SummaryView;

/// Render a session summary as Markdown.
pub fn generate_markdown(view: &SummaryView) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Interview Results: {}\n\n", view.position));
    if let Some(name) = &view.candidate_name {
        md.push_str(&format!("**Candidate:** {name}  \n"));
    }
    md.push_str(&format!("**Difficulty:** {}  \n", view.difficulty));
    md.push_str(&format!("**Session:** #{}  \n", view.session_id));
    md.push_str(&format!(
        "**Overall score:** {:.1}/10 ({})\n\n",
        view.score, view.performance
    ));

    if !view.warnings.is_empty() {
        for w in &view.warnings {
            md.push_str(&format!("> Warning: {w}\n"));
        }
        md.push('\n');
    }

    md.push_str("| # | Type | Question | Score |\n");
    md.push_str("|---|------|----------|-------|\n");
    for row in &view.rows {
        let score = row
            .score
            .map(|s| format!("{s:.1}"))
            .unwrap_or_else(|| "-".to_string());
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            row.ordinal,
            table_cell(&row.question_type),
            table_cell(&row.question_text),
            score
        ));
    }

    for row in &view.rows {
        md.push_str(&format!("\n## Question {}\n\n", row.ordinal));
        md.push_str(&format!("{}\n\n", row.question_text));
        if row.missing_response {
            md.push_str("_No response recorded._\n");
            continue;
        }
        md.push_str("**Answer:**\n\n");
        for line in row.answer.lines() {
            md.push_str(&format!("> {line}\n"));
        }
        md.push_str(&format!("\n**Feedback:** {}\n", row.feedback));
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(view: &SummaryView, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_markdown(view))?;
    Ok(())
}

fn table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
