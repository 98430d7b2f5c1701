//! Grouped count queries backing the report engine.

use super::traits::RecordSource;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::types::{Category, CombinedRecord, CountRecord};
use crate::utils::time::recent_cutoff;
use chrono::Utc;
use rusqlite::{params_from_iter, types::Value};
use tracing::debug;

impl Database {
    /// `SELECT <category>, COUNT(*) ... GROUP BY <category>` with an optional
    /// `modified >= cutoff` filter.
    fn grouped_counts(&self, category: Category, since: Option<&str>) -> AppResult<Vec<CountRecord>> {
        // Column names come from the closed Category enum, never from input
        let column = category.as_str();
        let sql = match since {
            Some(_) => format!(
                "SELECT {column}, COUNT(unique_id) AS count FROM submissions
                 WHERE modified >= ?1 GROUP BY {column}"
            ),
            None => format!(
                "SELECT {column}, COUNT(unique_id) AS count FROM submissions GROUP BY {column}"
            ),
        };
        let args: Vec<Value> = since
            .map(|cutoff| Value::Text(cutoff.to_string()))
            .into_iter()
            .collect();

        let mut stmt = self.connection().prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(args))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let value: Option<String> = row.get(0)?;
            let count = count_from_row(row.get(1)?)?;
            let mut record = CountRecord::new(count);
            record.set(category, value);
            records.push(record);
        }

        debug!("{} grouped rows for {}", records.len(), column);
        Ok(records)
    }
}

fn count_from_row(count: i64) -> AppResult<u64> {
    u64::try_from(count)
        .map_err(|_| AppError::InvalidData("Negative submission count encountered".to_string()))
}

impl RecordSource for Database {
    fn fetch_items(&self, category: Category) -> AppResult<Vec<CountRecord>> {
        self.grouped_counts(category, None)
    }

    fn fetch_combined(&self) -> AppResult<Vec<CombinedRecord>> {
        let mut stmt = self.connection().prepare(
            "SELECT cms_version, php_version, COUNT(unique_id) AS count
             FROM submissions
             WHERE cms_version IS NOT NULL AND php_version IS NOT NULL
             GROUP BY cms_version, php_version",
        )?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(CombinedRecord {
                cms_version: row.get(0)?,
                php_version: row.get(1)?,
                count: count_from_row(row.get(2)?)?,
            });
        }

        debug!("{} combined rows", records.len());
        Ok(records)
    }

    fn fetch_recently_updated(&self, hint: Option<Category>) -> AppResult<Vec<CountRecord>> {
        let window = self.recent_window();
        let category = hint.unwrap_or(window.default_category);
        let cutoff = recent_cutoff(Utc::now(), window.days);
        debug!("Recently updated {} since {}", category, cutoff);
        self.grouped_counts(category, Some(&cutoff))
    }

    fn fetch_full_dataset(&self) -> AppResult<Vec<Vec<CountRecord>>> {
        Category::ALL
            .into_iter()
            .map(|category| self.grouped_counts(category, None))
            .collect()
    }
}
