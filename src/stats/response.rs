//! Assembling aggregated data into the final report response.

use super::aggregator::Aggregation;
use super::sanitizer::{retain_reportable, sanitize};
use crate::types::{CategoryData, CombinedTable, ReportData, ReportResponse};
use std::collections::BTreeMap;

/// Build a category-shaped response.
///
/// Unreportable names are dropped in both views; the sanitised view then
/// buckets and converts to percentages of the aggregation total.
pub fn assemble(aggregation: Aggregation, authorized_raw: bool) -> ReportResponse {
    let total = aggregation.total;
    let categories: BTreeMap<_, _> = aggregation
        .categories
        .into_iter()
        .map(|(category, entries)| {
            let entries = retain_reportable(entries);
            let data = if authorized_raw {
                CategoryData::Raw(entries)
            } else {
                CategoryData::Sanitized(sanitize(category, &entries, total))
            };
            (category, data)
        })
        .collect();

    ReportResponse {
        data: ReportData::Categories(categories),
        total,
    }
}

/// Build a combined response; never sanitised.
pub fn assemble_combined(table: CombinedTable, total: u64) -> ReportResponse {
    ReportResponse {
        data: ReportData::Combined(table),
        total,
    }
}
