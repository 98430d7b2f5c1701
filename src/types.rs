//! CMS Usage Statistics - Type System
//!
//! - `category`: The closed set of tracked telemetry dimensions
//! - `records`: Raw count rows, submissions and intermediate accumulations
//! - `report`: Client-facing response shapes and their JSON encoding
//! - `statistics`: Import bookkeeping

pub mod category;
pub mod records;
pub mod report;
pub mod statistics;

pub use category::Category;
pub use records::{Bucket, CombinedRecord, CountRecord, NameCount, Submission};
pub use report::{CategoryData, CombinedTable, ReportData, ReportResponse, TOTAL_KEY};
pub use statistics::{ImportStats, TimingInfo};
