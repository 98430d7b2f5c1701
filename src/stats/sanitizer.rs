//! Coarsening accumulated values into privacy-safe percentage buckets.

use crate::types::{Bucket, Category, NameCount};
use crate::utils::math::rounded_percentage;
use std::collections::HashMap;

/// How raw values of a category are grouped before percentages are taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketRule {
    /// `major.minor` branch of a dotted version
    MinorVersion,
    /// Leading whitespace-delimited token of an OS string
    OsFamily,
    /// Every distinct value is its own bucket
    Identity,
}

impl BucketRule {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::PhpVersion | Category::DbVersion | Category::CmsVersion => {
                BucketRule::MinorVersion
            }
            Category::ServerOs => BucketRule::OsFamily,
            Category::DbType => BucketRule::Identity,
        }
    }

    pub fn label(&self, name: &str) -> String {
        match self {
            BucketRule::MinorVersion => version_branch(name),
            BucketRule::OsFamily => os_family(name).to_string(),
            BucketRule::Identity => name.to_string(),
        }
    }
}

/// `7.4.3` -> `7.4`, `7` -> `7.0`
pub fn version_branch(version: &str) -> String {
    let mut parts = version.split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or("0");
    format!("{}.{}", major, minor)
}

/// `Linux 5.10` -> `Linux`
pub fn os_family(os: &str) -> &str {
    os.split(char::is_whitespace).next().unwrap_or_default()
}

/// Names that never make it into a report: empty, or the literal `0`
pub fn is_reportable_name(name: &str) -> bool {
    !name.is_empty() && name != "0"
}

/// Drop entries whose name is not reportable
pub fn retain_reportable(entries: Vec<NameCount>) -> Vec<NameCount> {
    entries
        .into_iter()
        .filter(|entry| is_reportable_name(&entry.name))
        .collect()
}

/// Sum counts per bucket label, in first-seen label order
pub fn bucketize(rule: BucketRule, entries: &[NameCount]) -> Vec<NameCount> {
    let mut buckets: Vec<NameCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let label = rule.label(&entry.name);
        match index.get(&label) {
            Some(&position) => buckets[position].count += entry.count,
            None => {
                index.insert(label.clone(), buckets.len());
                buckets.push(NameCount::new(label, entry.count));
            }
        }
    }

    buckets
}

/// Bucket a category's entries and convert counts to percentages of `total`.
///
/// Percentages are rounded independently, so they need not sum to 100.
pub fn sanitize(category: Category, entries: &[NameCount], total: u64) -> Vec<Bucket> {
    bucketize(BucketRule::for_category(category), entries)
        .into_iter()
        .map(|bucket| Bucket {
            percentage: rounded_percentage(bucket.count, total),
            label: bucket.name,
        })
        .collect()
}
