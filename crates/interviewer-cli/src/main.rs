//! interviewer CLI: run interview practice sessions from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use interviewer_core::model::Difficulty;

mod commands;

#[derive(Parser)]
#[command(
    name = "interviewer",
    version,
    about = "Guided interview practice sessions"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new interview and answer its questions
    Start {
        /// Candidate name (defaults to [candidate] in the config)
        #[arg(long)]
        name: Option<String>,

        /// Candidate email (defaults to [candidate] in the config)
        #[arg(long)]
        email: Option<String>,

        /// Position to interview for, e.g. "Backend Engineer"
        #[arg(long)]
        position: String,

        /// Difficulty: easy, medium, hard
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },

    /// Continue an interview where it was left off
    Resume {
        /// Interview id
        #[arg(long)]
        id: i64,
    },

    /// Show the results of an interview
    Results {
        /// Interview id
        #[arg(long)]
        id: i64,

        /// Output format: text, json, html, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List past interviews for an email address
    History {
        /// Candidate email (defaults to [candidate] in the config)
        #[arg(long)]
        email: Option<String>,
    },

    /// Check that the interview service is reachable
    Health,

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("interviewer=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Start {
            name,
            email,
            position,
            difficulty,
        } => commands::start::execute(name, email, position, difficulty, config).await,
        Commands::Resume { id } => commands::resume::execute(id, config).await,
        Commands::Results { id, format, output } => {
            commands::results::execute(id, format, output, config).await
        }
        Commands::History { email } => commands::history::execute(email, config).await,
        Commands::Health => commands::health::execute(config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
