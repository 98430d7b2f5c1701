//! The closed set of telemetry dimensions a report can cover.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One tracked telemetry dimension.
///
/// Declaration order is the reporting order: `BTreeMap<Category, _>` iterates
/// php_version, db_type, db_version, cms_version, server_os.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PhpVersion,
    DbType,
    DbVersion,
    CmsVersion,
    ServerOs,
}

impl Category {
    /// Every category, in reporting order.
    pub const ALL: [Category; 5] = [
        Category::PhpVersion,
        Category::DbType,
        Category::DbVersion,
        Category::CmsVersion,
        Category::ServerOs,
    ];

    /// Wire identifier, also the `submissions` column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PhpVersion => "php_version",
            Category::DbType => "db_type",
            Category::DbVersion => "db_version",
            Category::CmsVersion => "cms_version",
            Category::ServerOs => "server_os",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Category::PhpVersion => 0,
            Category::DbType => 1,
            Category::DbVersion => 2,
            Category::CmsVersion => 3,
            Category::ServerOs => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| AppError::InvalidRequest(format!("Unknown category: {}", s)))
    }
}
