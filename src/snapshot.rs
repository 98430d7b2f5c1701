//! Point-in-time report snapshots written to disk.
//!
//! File names: `<YYYYmmdd_HHMMSS>[_<source>][_recent].json`

use crate::errors::AppResult;
use crate::stats::ReportRequest;
use crate::types::ReportResponse;
use crate::utils::time::snapshot_stamp;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes rendered reports into a snapshot directory
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    directory: PathBuf,
}

impl SnapshotWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name for a snapshot of `request` taken at `taken_at`
    pub fn file_name(request: &ReportRequest, taken_at: &DateTime<Utc>) -> String {
        let mut name = snapshot_stamp(taken_at);
        let source = request.source.to_string();
        if !source.is_empty() {
            name.push('_');
            name.push_str(&source);
        }
        if request.recent {
            name.push_str("_recent");
        }
        name.push_str(".json");
        name
    }

    /// Write `response` now; returns the file path
    pub fn write(&self, response: &ReportResponse, request: &ReportRequest) -> AppResult<PathBuf> {
        self.write_at(response, request, &Utc::now())
    }

    pub fn write_at(
        &self,
        response: &ReportResponse,
        request: &ReportRequest,
        taken_at: &DateTime<Utc>,
    ) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(Self::file_name(request, taken_at));
        fs::write(&path, serde_json::to_string(response)?)?;
        info!("Snapshot written to: {}", path.display());
        Ok(path)
    }
}
