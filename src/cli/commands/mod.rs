pub mod import;
pub mod report;
pub mod snapshot;

use crate::config::AppConfig;
use crate::database::Database;
use crate::errors::AppResult;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ===== Helper Functions =====

/// Load configuration, falling back to defaults when no config is usable
pub(crate) fn load_config() -> AppConfig {
    match AppConfig::load() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

/// Database path from CLI argument or config file
pub(crate) fn resolve_db_path(cli_path: &Option<PathBuf>, app_config: &AppConfig) -> PathBuf {
    cli_path
        .clone()
        .unwrap_or_else(|| app_config.database.default_path.clone())
}

/// Open the submission store with the configured recent window
pub(crate) fn open_database(path: &Path, app_config: &AppConfig) -> AppResult<Database> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(Database::new(&path.to_string_lossy())?
        .with_recent_window(app_config.reporting.recent_window()))
}

/// Write output to file with safe directory creation
pub(crate) fn write_output_to_file(path: &Path, content: &str, description: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("{} written to: {}", description, path.display());
    Ok(())
}
