use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// CMS Usage Statistics Reporter
#[derive(Parser)]
#[command(name = "cms-stats")]
#[command(about = "Aggregate anonymous CMS installation statistics into reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Render a report (raw counts with a valid token, percentages otherwise)
    Report(commands::report::ReportCommand),
    /// Write a sanitised report snapshot to disk
    Snapshot(commands::snapshot::SnapshotCommand),
    /// Import submissions from a CSV export
    Import(commands::import::ImportCommand),
}

pub fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(command) => command.run(),
        Commands::Snapshot(command) => command.run(),
        Commands::Import(command) => command.run(),
    }
}
