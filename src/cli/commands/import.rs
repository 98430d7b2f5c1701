use super::{load_config, open_database, resolve_db_path};
use crate::database::StatisticsOperations;
use crate::errors::{AppError, AppResult};
use crate::processor::SubmissionImporter;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Load submissions from a CSV export into the store
#[derive(Args)]
pub struct ImportCommand {
    /// Path to the submissions CSV file
    #[arg(long)]
    csv_path: PathBuf,

    /// Database path (overrides config.toml)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Batch size for database upserts (overrides config.toml)
    #[arg(long)]
    batch_size: Option<usize>,
}

impl ImportCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== CMS Stats - Import ===");
        let app_config = load_config();

        if !self.csv_path.exists() {
            return Err(AppError::Config(format!(
                "CSV file does not exist: {}",
                self.csv_path.display()
            )));
        }

        let db_path = resolve_db_path(&self.database_path, &app_config);
        let batch_size = self.batch_size.unwrap_or(app_config.import.batch_size);

        info!("Configuration:");
        info!("  CSV file: {}", self.csv_path.display());
        info!("  Database: {}", db_path.display());
        info!("  Batch size: {}", batch_size);

        let mut database = open_database(&db_path, &app_config)?;
        let importer = SubmissionImporter::new(batch_size)?;
        let stats = importer.import_file(&mut database, &self.csv_path)?;

        let db_stats = database.get_database_stats()?;
        println!("{}", stats.summary());
        println!("Store now holds {} submissions", db_stats.total_submissions);
        if let (Some(oldest), Some(newest)) = (&db_stats.oldest_modified, &db_stats.newest_modified) {
            println!("Submissions modified between {} and {}", oldest, newest);
        }
        Ok(())
    }
}
