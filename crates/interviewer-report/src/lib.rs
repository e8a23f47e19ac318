//! Report rendering for finished interview sessions.

pub mod html;
pub mod markdown;

use anyhow::Result;
use std::path::Path;

use interviewer_core::summary::SummaryView;

/// Write a summary view as pretty-printed JSON.
pub fn write_json_report(view: &SummaryView, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(view)?;
    std::fs::write(path, json)?;
    Ok(())
}
