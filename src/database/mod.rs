//! SQLite submission store and record sources.
//!
//! ## Architecture
//!
//! The `Database` struct holds a SQLite connection and implements:
//! - `RecordSource` - grouped count queries consumed by the report engine
//! - `SubmissionOperations` - per-installation upserts
//! - `StatisticsOperations` - store statistics
//!
//! `InMemorySource` implements `RecordSource` over pre-fetched rows.

pub mod memory;
mod records;
pub mod schema;
pub mod statistics;
mod submissions;
pub mod traits;

pub use memory::InMemorySource;
pub use schema::setup_schema;
pub use statistics::DatabaseStats;
pub use traits::*;

use crate::errors::AppResult;
use crate::types::Category;
use rusqlite::Connection;
use tracing::info;

/// Default length of the recently-updated window, in days
pub const DEFAULT_RECENT_DAYS: u32 = 90;

/// Which rows count as "recently updated" and what they report by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentWindow {
    pub days: u32,
    /// Category reported when the caller gives no hint
    pub default_category: Category,
}

impl Default for RecentWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_RECENT_DAYS,
            default_category: Category::CmsVersion,
        }
    }
}

/// The submission store
pub struct Database {
    connection: Connection,
    recent_window: RecentWindow,
}

impl Database {
    /// Open (or create) the store at `database_path` and initialise the schema.
    ///
    /// `":memory:"` gives a throwaway store.
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;

        setup_schema(&connection)?;

        info!("Database initialised at: {}", database_path);
        Ok(Self {
            connection,
            recent_window: RecentWindow::default(),
        })
    }

    /// Replace the recently-updated window
    pub fn with_recent_window(mut self, recent_window: RecentWindow) -> Self {
        self.recent_window = recent_window;
        self
    }

    pub fn recent_window(&self) -> RecentWindow {
        self.recent_window
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
