//! Client-facing report structures and their JSON shape.
//!
//! ```json
//! {"data": {"php_version": {"7.4": 75.0, "8.0": 25.0}, "total": 20}}
//! {"data": {"db_type": [{"name": "mysql", "count": 9}], "total": 9}}
//! {"data": {"3.9": {"7.2": 4, "7.4": 6}, "total": 10}}
//! ```

use super::category::Category;
use super::records::{Bucket, NameCount};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Key holding the grand total inside the `data` object
pub const TOTAL_KEY: &str = "total";

/// Two-level cross-tabulation: cms_version -> php_version -> count
pub type CombinedTable = BTreeMap<String, BTreeMap<String, u64>>;

/// Report content for one category.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryData {
    /// Authorised view: every accumulated value with its integer count
    Raw(Vec<NameCount>),
    /// Public view: coarse buckets with percentage of the grand total
    Sanitized(Vec<Bucket>),
}

impl CategoryData {
    pub fn len(&self) -> usize {
        match self {
            CategoryData::Raw(entries) => entries.len(),
            CategoryData::Sanitized(buckets) => buckets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Percentage for `label`, if this is sanitised data containing it
    pub fn percentage(&self, label: &str) -> Option<f64> {
        match self {
            CategoryData::Sanitized(buckets) => buckets
                .iter()
                .find(|bucket| bucket.label == label)
                .map(|bucket| bucket.percentage),
            CategoryData::Raw(_) => None,
        }
    }

    /// Raw count for `name`, if this is raw data containing it
    pub fn count(&self, name: &str) -> Option<u64> {
        match self {
            CategoryData::Raw(entries) => entries
                .iter()
                .find(|entry| entry.name == name)
                .map(|entry| entry.count),
            CategoryData::Sanitized(_) => None,
        }
    }
}

impl Serialize for CategoryData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryData::Raw(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for entry in entries {
                    seq.serialize_element(entry)?;
                }
                seq.end()
            }
            // Label -> percentage object, keeping bucket order
            CategoryData::Sanitized(buckets) => {
                let mut map = serializer.serialize_map(Some(buckets.len()))?;
                for bucket in buckets {
                    map.serialize_entry(&bucket.label, &bucket.percentage)?;
                }
                map.end()
            }
        }
    }
}

/// Shape of the `data` object, which depends on the reporting mode
#[derive(Debug, Clone, PartialEq)]
pub enum ReportData {
    Categories(BTreeMap<Category, CategoryData>),
    Combined(CombinedTable),
}

/// Final response for one report request
#[derive(Debug, Clone, PartialEq)]
pub struct ReportResponse {
    pub data: ReportData,
    pub total: u64,
}

impl ReportResponse {
    /// Category data, for category-shaped responses
    pub fn category(&self, category: Category) -> Option<&CategoryData> {
        match &self.data {
            ReportData::Categories(categories) => categories.get(&category),
            ReportData::Combined(_) => None,
        }
    }

    /// Cross-tabulation, for combined responses
    pub fn combined(&self) -> Option<&CombinedTable> {
        match &self.data {
            ReportData::Combined(table) => Some(table),
            ReportData::Categories(_) => None,
        }
    }
}

/// The `data` object: mode-specific entries followed by `total`
struct DataBody<'a>(&'a ReportResponse);

impl Serialize for DataBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let response = self.0;
        let mut map = serializer.serialize_map(None)?;
        match &response.data {
            ReportData::Categories(categories) => {
                for (category, data) in categories {
                    map.serialize_entry(category.as_str(), data)?;
                }
            }
            ReportData::Combined(table) => {
                for (cms_version, php_versions) in table {
                    if cms_version != TOTAL_KEY {
                        map.serialize_entry(cms_version, php_versions)?;
                    }
                }
            }
        }
        map.serialize_entry(TOTAL_KEY, &response.total)?;
        map.end()
    }
}

impl Serialize for ReportResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("data", &DataBody(self))?;
        map.end()
    }
}
