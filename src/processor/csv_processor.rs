use crate::database::{Database, SubmissionOperations};
use crate::errors::{AppError, AppResult};
use crate::types::{ImportStats, Submission};
use crate::utils::time::parse_submission_datetime;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// One CSV row; header `unique_id,php_version,db_type,db_version,cms_version,server_os[,modified]`
#[derive(Debug, Deserialize)]
struct SubmissionRow {
    unique_id: Option<String>,
    php_version: Option<String>,
    db_type: Option<String>,
    db_version: Option<String>,
    cms_version: Option<String>,
    /// Kept as text even when blank; blank OS strings report as "unknown"
    #[serde(default)]
    server_os: String,
    #[serde(default)]
    modified: Option<String>,
}

impl SubmissionRow {
    fn into_submission(self) -> AppResult<Option<Submission>> {
        let Some(unique_id) = self.unique_id.filter(|id| !id.trim().is_empty()) else {
            return Ok(None);
        };
        let modified = self
            .modified
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_submission_datetime)
            .transpose()?;

        Ok(Some(Submission {
            unique_id,
            php_version: self.php_version,
            db_type: self.db_type,
            db_version: self.db_version,
            cms_version: self.cms_version,
            server_os: Some(self.server_os),
            modified,
        }))
    }
}

/// Bulk loader for submission CSV exports
pub struct SubmissionImporter {
    batch_size: usize,
}

impl SubmissionImporter {
    pub fn new(batch_size: usize) -> AppResult<Self> {
        if batch_size == 0 {
            return Err(AppError::Config(
                "Import batch size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { batch_size })
    }

    /// Import a CSV file into `database`
    pub fn import_file(&self, database: &mut Database, csv_path: &Path) -> AppResult<ImportStats> {
        info!("Importing submissions from {}", csv_path.display());
        let file = File::open(csv_path).map_err(AppError::Io)?;
        self.import_reader(database, BufReader::new(file))
    }

    /// Import CSV data from any reader.
    ///
    /// Rows without a `unique_id` or with an unreadable timestamp are skipped.
    pub fn import_reader<R: Read>(&self, database: &mut Database, reader: R) -> AppResult<ImportStats> {
        let mut stats = ImportStats::new();
        let mut csv_reader = ReaderBuilder::new()
            .comment(Some(b'#')) // Skip lines starting with #
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut batch = Vec::with_capacity(self.batch_size);

        for (line_num, result) in csv_reader.deserialize::<SubmissionRow>().enumerate() {
            stats.rows_read += 1;
            let row = result.map_err(AppError::Csv)?;

            match row.into_submission() {
                Ok(Some(submission)) => batch.push(submission),
                Ok(None) => {
                    warn!("Row {} has no unique_id, skipping", line_num + 1);
                    stats.rows_skipped += 1;
                }
                Err(e) => {
                    warn!("Row {} is malformed: {}", line_num + 1, e);
                    stats.rows_skipped += 1;
                }
            }

            if batch.len() >= self.batch_size {
                stats.rows_imported += database.insert_submissions_batch(&batch)?;
                stats.batches_written += 1;
                debug!("Batch {} written", stats.batches_written);
                batch.clear();
            }
        }

        // Process remaining batch
        if !batch.is_empty() {
            stats.rows_imported += database.insert_submissions_batch(&batch)?;
            stats.batches_written += 1;
        }

        stats.timing.finish();
        info!("{}", stats.summary());
        Ok(stats)
    }
}
