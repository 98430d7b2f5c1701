use super::{load_config, open_database, resolve_db_path, write_output_to_file};
use crate::auth::authorize_raw;
use crate::errors::AppResult;
use crate::stats::{format_report, OutputFormat, ReportRequest, StatsEngine};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Render a statistics report
#[derive(Args)]
pub struct ReportCommand {
    /// Data source: empty for all categories, a category name, or cms_php
    #[arg(long, default_value = "")]
    source: String,

    /// Report on recently updated installations only
    #[arg(long)]
    recent: bool,

    /// Raw-access token; a valid token returns unsanitised counts
    #[arg(long)]
    token: Option<String>,

    /// Database path (overrides config.toml)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Output format (json, pretty or console)
    #[arg(long, default_value = "json")]
    format: String,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

impl ReportCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = load_config();

        let authorized_raw = authorize_raw(
            self.token.as_deref(),
            app_config.api.raw_token_sha256.as_deref(),
        );
        if self.token.is_some() && !authorized_raw {
            info!("Token rejected, serving sanitised report");
        }
        let request = ReportRequest::from_params(&self.source, self.recent, authorized_raw)?;

        let db_path = resolve_db_path(&self.database_path, &app_config);
        let database = open_database(&db_path, &app_config)?;
        let engine = StatsEngine::with_total_policy(app_config.reporting.total_policy);
        let response = engine.render(&database, &request)?;
        drop(database);

        let formatted = format_report(&response, OutputFormat::parse(&self.format))?;
        match &self.output {
            Some(path) => write_output_to_file(path, &formatted, "Report")?,
            None => println!("{}", formatted),
        }
        Ok(())
    }
}
