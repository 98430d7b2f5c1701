//! Store statistics.

use super::traits::StatisticsOperations;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::types::Category;

/// Basic submission store statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    pub total_submissions: usize,
    /// Rows with a non-null value, per category in reporting order
    pub populated: Vec<(Category, usize)>,
    pub oldest_modified: Option<String>,
    pub newest_modified: Option<String>,
}

impl DatabaseStats {
    pub fn coverage_percentage(&self, category: Category) -> f64 {
        let populated = self
            .populated
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        crate::utils::math::safe_percentage_u64(populated as u64, self.total_submissions as u64)
    }
}

fn to_usize(value: i64) -> AppResult<usize> {
    usize::try_from(value)
        .map_err(|_| AppError::InvalidData("Negative row count encountered".to_string()))
}

impl StatisticsOperations for Database {
    fn get_database_stats(&self) -> AppResult<DatabaseStats> {
        let conn = self.connection();

        let (total, oldest, newest): (i64, Option<String>, Option<String>) = conn.query_row(
            "SELECT COUNT(*), MIN(modified), MAX(modified) FROM submissions",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        let mut populated = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let sql = format!(
                "SELECT COUNT(*) FROM submissions WHERE {} IS NOT NULL",
                category.as_str()
            );
            let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
            populated.push((category, to_usize(count)?));
        }

        Ok(DatabaseStats {
            total_submissions: to_usize(total)?,
            populated,
            oldest_modified: oldest,
            newest_modified: newest,
        })
    }
}
