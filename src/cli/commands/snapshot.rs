use super::{load_config, open_database, resolve_db_path};
use crate::errors::AppResult;
use crate::snapshot::SnapshotWriter;
use crate::stats::{ReportRequest, StatsEngine};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Write a sanitised report snapshot to the snapshot directory
#[derive(Args)]
pub struct SnapshotCommand {
    /// Data source: empty for all categories, a category name, or cms_php
    #[arg(long, default_value = "")]
    source: String,

    /// Snapshot recently updated installations only
    #[arg(long)]
    recent: bool,

    /// Database path (overrides config.toml)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Snapshot directory (overrides config.toml)
    #[arg(long)]
    directory: Option<PathBuf>,
}

impl SnapshotCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = load_config();
        let request = ReportRequest::from_params(&self.source, self.recent, false)?;

        let db_path = resolve_db_path(&self.database_path, &app_config);
        let database = open_database(&db_path, &app_config)?;
        let response = StatsEngine::with_total_policy(app_config.reporting.total_policy)
            .render(&database, &request)?;
        drop(database);

        let directory = self
            .directory
            .clone()
            .unwrap_or_else(|| app_config.snapshot.directory.clone());
        let path = SnapshotWriter::new(directory).write(&response, &request)?;

        info!("Snapshot covers {} submissions", response.total);
        println!("Snapshot written to: {}", path.display());
        Ok(())
    }
}
