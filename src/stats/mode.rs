//! Request parameters and reporting mode selection.

use crate::errors::{AppError, AppResult};
use crate::types::Category;
use std::fmt;
use std::str::FromStr;

/// Identifier of the combined CMS x PHP cross-tabulation source
pub const COMBINED_SOURCE: &str = "cms_php";

/// Which data source a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportSource {
    /// Every category (empty source string)
    #[default]
    All,
    Single(Category),
    /// CMS version against PHP version
    CmsPhp,
}

impl FromStr for ReportSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(ReportSource::All),
            COMBINED_SOURCE => Ok(ReportSource::CmsPhp),
            other => other
                .parse::<Category>()
                .map(ReportSource::Single)
                .map_err(|_| AppError::InvalidRequest(format!("Unknown data source: {}", other))),
        }
    }
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSource::All => Ok(()),
            ReportSource::Single(category) => f.write_str(category.as_str()),
            ReportSource::CmsPhp => f.write_str(COMBINED_SOURCE),
        }
    }
}

/// The four ways a report can be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Recently-updated rows; carries the requested category as a hint for the source
    RecentlyUpdated(Option<Category>),
    Combined,
    Single(Category),
    Full,
}

/// One report request as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportRequest {
    pub source: ReportSource,
    pub recent: bool,
    /// Set by an upstream credential check, never derived here
    pub authorized_raw: bool,
}

impl ReportRequest {
    /// Validate raw request parameters.
    ///
    /// An unrecognised `source` is rejected even when `recent` is set.
    pub fn from_params(source: &str, recent: bool, authorized_raw: bool) -> AppResult<Self> {
        Ok(Self {
            source: source.parse()?,
            recent,
            authorized_raw,
        })
    }

    pub fn mode(&self) -> ReportMode {
        if self.recent {
            let hint = match self.source {
                ReportSource::Single(category) => Some(category),
                ReportSource::All | ReportSource::CmsPhp => None,
            };
            return ReportMode::RecentlyUpdated(hint);
        }

        match self.source {
            ReportSource::CmsPhp => ReportMode::Combined,
            ReportSource::Single(category) => ReportMode::Single(category),
            ReportSource::All => ReportMode::Full,
        }
    }
}
