//! Folding raw count records into per-category value totals.
//!
//! Values keep the order in which they were first seen, so the SQL source's
//! row order carries through to the report.

use crate::types::{Category, CombinedRecord, CombinedTable, CountRecord, NameCount, TOTAL_KEY};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Label substituted for an empty or whitespace-only server OS
pub const UNKNOWN_OS: &str = "unknown";

/// How the grand total behaves across the groups of a full-dataset fold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalPolicy {
    /// Total restarts at every group; the report carries the last group's total
    #[default]
    LastGroup,
    /// Total keeps growing across groups
    Cumulative,
}

/// Normalise a record's value for `category`.
///
/// Returns `None` when the record should not count towards the category.
pub fn normalise_value(category: Category, raw: Option<&str>) -> Option<String> {
    let value = raw?;
    match category {
        Category::ServerOs if value.trim().is_empty() => Some(UNKNOWN_OS.to_string()),
        _ if value.is_empty() => None,
        _ => Some(value.to_string()),
    }
}

/// Ordered name -> count accumulator for one category
#[derive(Debug, Clone, Default)]
pub struct CategoryAccumulator {
    entries: Vec<NameCount>,
    index: HashMap<String, usize>,
}

impl CategoryAccumulator {
    pub fn add(&mut self, name: String, count: u64) {
        match self.index.get(&name) {
            Some(&position) => self.entries[position].count += count,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(NameCount { name, count });
            }
        }
    }

    pub fn into_entries(self) -> Vec<NameCount> {
        self.entries
    }
}

/// Result of a fold: per-category entries plus the grand total
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub categories: BTreeMap<Category, Vec<NameCount>>,
    pub total: u64,
}

/// Accumulates count records for one request
#[derive(Debug, Default)]
pub struct Aggregator {
    categories: BTreeMap<Category, CategoryAccumulator>,
    total: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with empty accumulators so these categories are reported even without rows
    pub fn with_categories(categories: &[Category]) -> Self {
        let mut aggregator = Self::new();
        for &category in categories {
            aggregator.categories.entry(category).or_default();
        }
        aggregator
    }

    /// Fold records into the accumulators, growing the grand total.
    ///
    /// Each category value present on a record adds the record's count to both
    /// its value total and the grand total.
    pub fn fold<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = CountRecord>,
    {
        for record in records {
            for category in Category::ALL {
                let Some(name) = normalise_value(category, record.value(category)) else {
                    continue;
                };
                self.categories
                    .entry(category)
                    .or_default()
                    .add(name, record.count);
                self.total += record.count;
            }
        }
    }

    /// Fold one group of a multi-group dataset.
    pub fn fold_group<I>(&mut self, group: I, policy: TotalPolicy)
    where
        I: IntoIterator<Item = CountRecord>,
    {
        if policy == TotalPolicy::LastGroup {
            self.total = 0;
        }
        self.fold(group);
    }

    pub fn finish(self) -> Aggregation {
        debug!(
            "Aggregated {} categories, total {}",
            self.categories.len(),
            self.total
        );
        Aggregation {
            categories: self
                .categories
                .into_iter()
                .map(|(category, accumulator)| (category, accumulator.into_entries()))
                .collect(),
            total: self.total,
        }
    }
}

/// Accumulates the CMS x PHP cross-tabulation
#[derive(Debug, Default)]
pub struct CombinedAggregator {
    table: CombinedTable,
    total: u64,
}

impl CombinedAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records missing either version are skipped, as are CMS versions that
    /// would collide with the `total` key of the response.
    pub fn fold<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = CombinedRecord>,
    {
        for record in records {
            let (Some(cms_version), Some(php_version)) = (record.cms_version, record.php_version)
            else {
                continue;
            };
            if cms_version == TOTAL_KEY {
                warn!(
                    "Skipping {} submissions reporting cms_version {:?}",
                    record.count, cms_version
                );
                continue;
            }
            *self
                .table
                .entry(cms_version)
                .or_default()
                .entry(php_version)
                .or_insert(0) += record.count;
            self.total += record.count;
        }
    }

    pub fn finish(self) -> (CombinedTable, u64) {
        (self.table, self.total)
    }
}
