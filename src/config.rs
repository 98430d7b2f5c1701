use crate::database::{RecentWindow, DEFAULT_RECENT_DAYS};
use crate::stats::TotalPolicy;
use crate::types::Category;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub reporting: ReportingConfig,
    pub snapshot: SnapshotConfig,
    pub import: ImportConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub default_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Length of the recently-updated window
    pub recent_days: u32,
    /// Category reported by recent requests that name none
    pub recent_category: Category,
    pub total_policy: TotalPolicy,
}

impl ReportingConfig {
    pub fn recent_window(&self) -> RecentWindow {
        RecentWindow {
            days: self.recent_days,
            default_category: self.recent_category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub batch_size: usize,
}

/// Raw-access credential settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Lowercase hex SHA-256 of the token that unlocks raw reports
    #[serde(default)]
    pub raw_token_sha256: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                default_path: PathBuf::from("./data/stats.db"),
            },
            reporting: ReportingConfig {
                recent_days: DEFAULT_RECENT_DAYS,
                recent_category: Category::CmsVersion,
                total_policy: TotalPolicy::default(),
            },
            snapshot: SnapshotConfig {
                directory: PathBuf::from("./snapshots"),
            },
            import: ImportConfig { batch_size: 1000 },
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default(
                "database.default_path",
                defaults.database.default_path.to_string_lossy().to_string(),
            )?
            .set_default("reporting.recent_days", i64::from(defaults.reporting.recent_days))?
            .set_default(
                "reporting.recent_category",
                defaults.reporting.recent_category.as_str(),
            )?
            .set_default("reporting.total_policy", "last_group")?
            .set_default(
                "snapshot.directory",
                defaults.snapshot.directory.to_string_lossy().to_string(),
            )?
            .set_default("import.batch_size", defaults.import.batch_size as i64)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // STATS_REPORTING__RECENT_DAYS=30 etc.
            .add_source(
                config::Environment::with_prefix("STATS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(db_path) = env::var("STATS_DATABASE_PATH") {
            app_config.database.default_path = PathBuf::from(db_path);
        }

        if app_config.import.batch_size == 0 {
            return Err(ConfigError::Message(
                "import.batch_size must be greater than zero".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        // Try to load config for defaults, but don't fail if not found
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => Ok(Self::default()),
        }
    }
}
