//! Time utilities for submission timestamps and snapshot names
//!
//! Submissions store `modified` as SQLite-style text so that range filters
//! compare lexicographically.

use crate::errors::AppResult;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// SQLite `datetime()` output format ("YYYY-MM-DD HH:MM:SS")
pub const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compact stamp used in snapshot file names
pub const SNAPSHOT_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Format a UTC timestamp the way SQLite's `datetime()` does
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use cms_stats::utils::time::format_sqlite_datetime;
///
/// let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(format_sqlite_datetime(&ts), "2024-01-02 03:04:05");
/// ```
pub fn format_sqlite_datetime(ts: &DateTime<Utc>) -> String {
    ts.format(SQLITE_DATETIME_FORMAT).to_string()
}

/// Parse a submission timestamp.
///
/// Accepts either the SQLite format or RFC 3339.
pub fn parse_submission_datetime(raw: &str) -> AppResult<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, SQLITE_DATETIME_FORMAT) {
        return Ok(naive.and_utc());
    }
    Ok(DateTime::parse_from_rfc3339(trimmed)?.with_timezone(&Utc))
}

/// Lower bound (inclusive) of the recently-updated window ending at `now`
pub fn recent_cutoff(now: DateTime<Utc>, days: u32) -> String {
    format_sqlite_datetime(&(now - Duration::days(i64::from(days))))
}

/// Snapshot file stamp for `ts`
pub fn snapshot_stamp(ts: &DateTime<Utc>) -> String {
    ts.format(SNAPSHOT_STAMP_FORMAT).to_string()
}
