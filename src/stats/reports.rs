//! Report formatting for console and JSON output

use crate::errors::AppResult;
use crate::types::{CategoryData, ReportData, ReportResponse};

/// Output format options for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    /// Indented JSON
    JsonPretty,
    Console,
}

impl OutputFormat {
    /// Parse a format name; anything unrecognised falls back to compact JSON
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "console" | "text" => OutputFormat::Console,
            "pretty" | "json-pretty" => OutputFormat::JsonPretty,
            _ => OutputFormat::Json,
        }
    }
}

/// Format number with thousand separators for console output
///
/// ```
/// # use cms_stats::stats::reports::format_number;
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(904233), "904,233");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

pub fn format_report(response: &ReportResponse, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(response)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Console => Ok(format_console(response)),
    }
}

fn format_console(response: &ReportResponse) -> String {
    let mut output = String::new();

    match &response.data {
        ReportData::Categories(categories) => {
            for (category, data) in categories {
                output.push_str(&format!("{}\n", category));
                if data.is_empty() {
                    output.push_str("  (no data)\n");
                }
                match data {
                    CategoryData::Sanitized(buckets) => {
                        for bucket in buckets {
                            output.push_str(&format!(
                                "  {:<24} {:>7.2}%\n",
                                bucket.label, bucket.percentage
                            ));
                        }
                    }
                    CategoryData::Raw(entries) => {
                        for entry in entries {
                            output.push_str(&format!(
                                "  {:<24} {:>12}\n",
                                entry.name,
                                format_number(entry.count)
                            ));
                        }
                    }
                }
            }
        }
        ReportData::Combined(table) => {
            for (cms_version, php_versions) in table {
                output.push_str(&format!("CMS {}\n", cms_version));
                for (php_version, count) in php_versions {
                    output.push_str(&format!(
                        "  PHP {:<20} {:>12}\n",
                        php_version,
                        format_number(*count)
                    ));
                }
            }
        }
    }

    output.push_str(&format!("Total: {}\n", format_number(response.total)));
    output
}
