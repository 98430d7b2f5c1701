//! Statistics aggregation and reporting engine
//!
//! Turns grouped `(category, value, count)` rows from a [`RecordSource`] into
//! client-facing reports, either raw counts or sanitised percentage buckets.
//!
//! ## Pipeline
//!
//! 1. **Mode selection** ([`mode`]) - single category, combined CMS x PHP,
//!    full dataset, or recently updated
//! 2. **Aggregation** ([`aggregator`]) - per-value totals and the grand total
//! 3. **Sanitisation** ([`sanitizer`]) - version branches, OS families, percentages
//! 4. **Assembly** ([`response`]) - the `{"data": {..., "total": N}}` shape
//!
//! ## Usage
//!
//! ```rust
//! use cms_stats::database::InMemorySource;
//! use cms_stats::errors::AppResult;
//! use cms_stats::stats::{ReportRequest, StatsEngine};
//! use cms_stats::types::{Category, CountRecord};
//!
//! fn example() -> AppResult<()> {
//!     let source = InMemorySource::with_items(vec![
//!         CountRecord::single(Category::PhpVersion, "7.4.1", 10),
//!         CountRecord::single(Category::PhpVersion, "8.0.0", 10),
//!     ]);
//!     let request = ReportRequest::from_params("php_version", false, false)?;
//!     let response = StatsEngine::new().render(&source, &request)?;
//!     assert_eq!(response.total, 20);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod aggregator;
pub mod mode;
pub mod reports;
pub mod response;
pub mod sanitizer;

pub use aggregator::{Aggregation, Aggregator, CombinedAggregator, TotalPolicy, UNKNOWN_OS};
pub use mode::{ReportMode, ReportRequest, ReportSource, COMBINED_SOURCE};
pub use reports::{format_report, OutputFormat};
pub use sanitizer::BucketRule;

use crate::database::RecordSource;
use crate::errors::AppResult;
use crate::types::{Category, ReportResponse};
use tracing::{debug, info};

/// Report engine; holds only request-independent settings
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine {
    total_policy: TotalPolicy,
}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_total_policy(total_policy: TotalPolicy) -> Self {
        Self { total_policy }
    }

    /// Produce the report for one request.
    ///
    /// The source is only borrowed while fetching; fetched rows are moved into
    /// the fold and released before sanitisation.
    pub fn render<S>(&self, source: &S, request: &ReportRequest) -> AppResult<ReportResponse>
    where
        S: RecordSource + ?Sized,
    {
        let mode = request.mode();
        info!("Rendering {:?} report (raw: {})", mode, request.authorized_raw);

        let response = match mode {
            ReportMode::Combined => {
                let items = source.fetch_combined()?;
                debug!("Fetched {} combined rows", items.len());
                let mut aggregator = CombinedAggregator::new();
                aggregator.fold(items);
                let (table, total) = aggregator.finish();
                response::assemble_combined(table, total)
            }
            ReportMode::Single(category) => {
                let items = source.fetch_items(category)?;
                debug!("Fetched {} rows for {}", items.len(), category);
                let mut aggregator = Aggregator::with_categories(&[category]);
                aggregator.fold(items);
                response::assemble(aggregator.finish(), request.authorized_raw)
            }
            ReportMode::RecentlyUpdated(hint) => {
                let items = source.fetch_recently_updated(hint)?;
                debug!("Fetched {} recently updated rows", items.len());
                let mut aggregator = Aggregator::new();
                aggregator.fold(items);
                response::assemble(aggregator.finish(), request.authorized_raw)
            }
            ReportMode::Full => {
                let groups = source.fetch_full_dataset()?;
                debug!("Fetched {} groups for full report", groups.len());
                let mut aggregator = Aggregator::with_categories(&Category::ALL);
                for group in groups {
                    aggregator.fold_group(group, self.total_policy);
                }
                response::assemble(aggregator.finish(), request.authorized_raw)
            }
        };

        info!("Report total: {}", response.total);
        Ok(response)
    }
}
