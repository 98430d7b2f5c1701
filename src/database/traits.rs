//! Database trait abstractions.
//!
//! `RecordSource` is the read contract the report engine depends on;
//! `SubmissionOperations` and `StatisticsOperations` cover the write and
//! housekeeping side of the SQLite store.

use crate::errors::AppResult;
use crate::types::{Category, CombinedRecord, CountRecord, Submission};

/// Supplier of grouped count records for reports
pub trait RecordSource {
    /// Grouped counts for one category
    fn fetch_items(&self, category: Category) -> AppResult<Vec<CountRecord>>;

    /// Grouped counts keyed by (cms_version, php_version)
    fn fetch_combined(&self) -> AppResult<Vec<CombinedRecord>>;

    /// Grouped counts over recently-updated installations.
    ///
    /// `hint` is the category the caller asked for, if any; the source decides
    /// which category it reports otherwise.
    fn fetch_recently_updated(&self, hint: Option<Category>) -> AppResult<Vec<CountRecord>>;

    /// The complete dataset as a sequence of groups
    fn fetch_full_dataset(&self) -> AppResult<Vec<Vec<CountRecord>>>;
}

/// Submission storage
pub trait SubmissionOperations {
    /// Insert or replace one installation's submission
    fn upsert_submission(&mut self, submission: &Submission) -> AppResult<()>;

    /// Insert or replace a batch of submissions in one transaction
    fn insert_submissions_batch(&mut self, batch: &[Submission]) -> AppResult<usize>;

    /// Look up one installation
    fn get_submission(&self, unique_id: &str) -> AppResult<Option<Submission>>;
}

/// Basic store statistics
pub trait StatisticsOperations {
    fn get_database_stats(&self) -> AppResult<crate::database::DatabaseStats>;
}
