//! Submission upserts and lookups.

use super::traits::SubmissionOperations;
use super::Database;
use crate::errors::AppResult;
use crate::types::Submission;
use crate::utils::time::{format_sqlite_datetime, parse_submission_datetime};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

const UPSERT_SQL: &str = "INSERT INTO submissions (
        unique_id, php_version, db_type, db_version, cms_version, server_os, modified
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ON CONFLICT(unique_id) DO UPDATE SET
        php_version = excluded.php_version,
        db_type = excluded.db_type,
        db_version = excluded.db_version,
        cms_version = excluded.cms_version,
        server_os = excluded.server_os,
        modified = excluded.modified";

fn upsert_with(conn: &Connection, submission: &Submission) -> AppResult<()> {
    let modified = submission.modified.unwrap_or_else(Utc::now);
    conn.prepare_cached(UPSERT_SQL)?.execute(params![
        submission.unique_id,
        submission.php_version,
        submission.db_type,
        submission.db_version,
        submission.cms_version,
        submission.server_os,
        format_sqlite_datetime(&modified),
    ])?;
    Ok(())
}

/// Construct a Submission from a row of
/// `unique_id, php_version, db_type, db_version, cms_version, server_os, modified`
fn submission_from_row(row: &Row) -> rusqlite::Result<(Submission, String)> {
    let submission = Submission {
        unique_id: row.get(0)?,
        php_version: row.get(1)?,
        db_type: row.get(2)?,
        db_version: row.get(3)?,
        cms_version: row.get(4)?,
        server_os: row.get(5)?,
        modified: None,
    };
    Ok((submission, row.get(6)?))
}

impl SubmissionOperations for Database {
    fn upsert_submission(&mut self, submission: &Submission) -> AppResult<()> {
        upsert_with(self.connection(), submission)
    }

    fn insert_submissions_batch(&mut self, batch: &[Submission]) -> AppResult<usize> {
        let written = self.execute_transaction(|tx| {
            for submission in batch {
                upsert_with(tx, submission)?;
            }
            Ok(batch.len())
        })?;
        debug!("Upserted {} submissions", written);
        Ok(written)
    }

    fn get_submission(&self, unique_id: &str) -> AppResult<Option<Submission>> {
        let found = self
            .connection()
            .query_row(
                "SELECT unique_id, php_version, db_type, db_version, cms_version, server_os, modified
                 FROM submissions WHERE unique_id = ?1",
                [unique_id],
                submission_from_row,
            )
            .optional()?;

        match found {
            Some((mut submission, modified)) => {
                submission.modified = Some(parse_submission_datetime(&modified)?);
                Ok(Some(submission))
            }
            None => Ok(None),
        }
    }
}
