//! Record source over pre-fetched rows.
//!
//! Useful when rows come from somewhere other than the SQLite store (an export,
//! another service) and for exercising the report engine without a database.

use super::traits::RecordSource;
use crate::errors::AppResult;
use crate::types::{Category, CombinedRecord, CountRecord};

/// In-memory `RecordSource`
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    /// Rows served by `fetch_items` (filtered to the requested category)
    pub items: Vec<CountRecord>,
    pub combined: Vec<CombinedRecord>,
    /// Rows served by `fetch_recently_updated`, as-is
    pub recent: Vec<CountRecord>,
    pub groups: Vec<Vec<CountRecord>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<CountRecord>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_combined(combined: Vec<CombinedRecord>) -> Self {
        Self {
            combined,
            ..Self::default()
        }
    }

    pub fn with_recent(recent: Vec<CountRecord>) -> Self {
        Self {
            recent,
            ..Self::default()
        }
    }

    pub fn with_groups(groups: Vec<Vec<CountRecord>>) -> Self {
        Self {
            groups,
            ..Self::default()
        }
    }
}

impl RecordSource for InMemorySource {
    fn fetch_items(&self, category: Category) -> AppResult<Vec<CountRecord>> {
        Ok(self
            .items
            .iter()
            .filter(|record| record.value(category).is_some())
            .map(|record| {
                let mut single = CountRecord::new(record.count);
                single.set(category, record.value(category).map(str::to_string));
                single
            })
            .collect())
    }

    fn fetch_combined(&self) -> AppResult<Vec<CombinedRecord>> {
        Ok(self.combined.clone())
    }

    fn fetch_recently_updated(&self, _hint: Option<Category>) -> AppResult<Vec<CountRecord>> {
        Ok(self.recent.clone())
    }

    fn fetch_full_dataset(&self) -> AppResult<Vec<Vec<CountRecord>>> {
        Ok(self.groups.clone())
    }
}
