//! The `interviewer init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("interviewer.toml").exists() {
        println!("interviewer.toml already exists, skipping.");
    } else {
        std::fs::write("interviewer.toml", SAMPLE_CONFIG)?;
        println!("Created interviewer.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit interviewer.toml with your service URL and name");
    println!("  2. Run: interviewer health");
    println!("  3. Run: interviewer start --position \"Backend Engineer\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# interviewer configuration

base_url = "http://localhost:8080/api"
timeout_secs = 30

# How long feedback stays on screen before the next question.
advance_delay_ms = 3000

default_difficulty = "medium"

[candidate]
name = "${USER}"
email = "you@example.com"
"#;
