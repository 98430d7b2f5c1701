//! Submission store schema
//!
//! One row per installation, keyed by its anonymous `unique_id`. Category
//! columns are nullable: older clients do not report every field.

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Current schema version, stored in `PRAGMA user_version`
pub const SCHEMA_VERSION: i64 = 1;

/// Initialise the submissions schema
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA user_version = 1;

        CREATE TABLE IF NOT EXISTS submissions (
            unique_id TEXT PRIMARY KEY,
            php_version TEXT,
            db_type TEXT,
            db_version TEXT,
            cms_version TEXT,
            server_os TEXT,
            modified TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Recently-updated window filter
        CREATE INDEX IF NOT EXISTS idx_submissions_modified ON submissions(modified);
        -- Combined report grouping
        CREATE INDEX IF NOT EXISTS idx_submissions_cms_php
            ON submissions(cms_version, php_version);
        "#,
    )?;

    debug!("Submissions schema ready (version {})", SCHEMA_VERSION);
    Ok(())
}

/// Read the schema version of an open database
pub fn schema_version(connection: &Connection) -> AppResult<i64> {
    Ok(connection.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}
