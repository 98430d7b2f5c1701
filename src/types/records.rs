//! Raw and intermediate record shapes flowing through the report pipeline.

use super::category::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One grouped row of raw telemetry: a count plus the category values it was grouped by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountRecord {
    values: [Option<String>; 5],
    pub count: u64,
}

impl CountRecord {
    /// A record with no category values populated
    pub fn new(count: u64) -> Self {
        Self {
            values: Default::default(),
            count,
        }
    }

    /// A record carrying a single category value
    pub fn single(category: Category, value: impl Into<String>, count: u64) -> Self {
        Self::new(count).with(category, value)
    }

    /// Builder-style setter
    pub fn with(mut self, category: Category, value: impl Into<String>) -> Self {
        self.set(category, Some(value.into()));
        self
    }

    pub fn set(&mut self, category: Category, value: Option<String>) {
        self.values[category.index()] = value;
    }

    pub fn value(&self, category: Category) -> Option<&str> {
        self.values[category.index()].as_deref()
    }

    /// Categories with a value (possibly empty) on this record, in reporting order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |category| self.values[category.index()].is_some())
    }
}

/// A count keyed jointly by CMS version and PHP version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedRecord {
    pub cms_version: Option<String>,
    pub php_version: Option<String>,
    pub count: u64,
}

impl CombinedRecord {
    pub fn new(cms_version: impl Into<String>, php_version: impl Into<String>, count: u64) -> Self {
        Self {
            cms_version: Some(cms_version.into()),
            php_version: Some(php_version.into()),
            count,
        }
    }
}

/// Accumulated count for one value within a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: u64,
}

impl NameCount {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Sanitised output unit: a coarse label and its share of the grand total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub percentage: f64,
}

/// One installation's latest report, as stored by the record source.
///
/// Field order matches the CSV import header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub unique_id: String,
    #[serde(default)]
    pub php_version: Option<String>,
    #[serde(default)]
    pub db_type: Option<String>,
    #[serde(default)]
    pub db_version: Option<String>,
    #[serde(default)]
    pub cms_version: Option<String>,
    #[serde(default)]
    pub server_os: Option<String>,
    /// Last time the installation reported; `None` means "now" on insert
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn new(unique_id: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            php_version: None,
            db_type: None,
            db_version: None,
            cms_version: None,
            server_os: None,
            modified: None,
        }
    }

    /// Builder-style setter for one category column
    pub fn with(mut self, category: Category, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match category {
            Category::PhpVersion => self.php_version = value,
            Category::DbType => self.db_type = value,
            Category::DbVersion => self.db_version = value,
            Category::CmsVersion => self.cms_version = value,
            Category::ServerOs => self.server_os = value,
        }
        self
    }

    pub fn modified_at(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}
