//! CSV import feeding the report engine

use cms_stats::database::StatisticsOperations;
use cms_stats::processor::SubmissionImporter;
use cms_stats::stats::{ReportRequest, StatsEngine};
use cms_stats::types::Category;
use serde_json::json;
use std::io::Write;

use crate::common::database::TestDatabase;

const EXPORT: &str = "\
# nightly export
unique_id,php_version,db_type,db_version,cms_version,server_os,modified
a1,7.4.33,mysqli,5.7.42,3.10.12,Linux 5.15,2024-01-10 08:00:00
a2,8.1.27,mysqli,8.0.35,4.4.2,Linux 6.1,2024-01-11T09:30:00Z
a3,8.1.27,pgsql,15.4,4.4.2,,2024-01-12 10:00:00
,8.2.0,mysqli,8.0.35,5.0.0,Linux 6.1,2024-01-12 10:00:00
a4,8.2.14,mysqli,10.11.6,5.0.1,Windows NT 10.0,
";

#[test]
fn test_import_then_report() {
    let mut test_db = TestDatabase::new("csv_import_report").unwrap();
    let mut csv_file = tempfile::NamedTempFile::new().unwrap();
    csv_file.write_all(EXPORT.as_bytes()).unwrap();

    let importer = SubmissionImporter::new(2).unwrap();
    let stats = importer
        .import_file(test_db.database_mut(), csv_file.path())
        .unwrap();

    assert_eq!(stats.rows_read, 5);
    assert_eq!(stats.rows_imported, 4);
    assert_eq!(stats.rows_skipped, 1);
    assert_eq!(stats.batches_written, 2);

    let db_stats = test_db.database().get_database_stats().unwrap();
    assert_eq!(db_stats.total_submissions, 4);
    assert_eq!(db_stats.coverage_percentage(Category::PhpVersion), 100.0);

    let request = ReportRequest::from_params("server_os", false, false).unwrap();
    let response = StatsEngine::new()
        .render(test_db.database(), &request)
        .unwrap();
    assert_eq!(
        serde_json::to_value(&response).unwrap()["data"],
        json!({"server_os": {"Linux": 50.0, "unknown": 25.0, "Windows": 25.0}, "total": 4})
    );
}

#[test]
fn test_reimport_updates_existing_rows() {
    let mut test_db = TestDatabase::new("csv_reimport").unwrap();
    let importer = SubmissionImporter::new(10).unwrap();

    importer
        .import_reader(test_db.database_mut(), EXPORT.as_bytes())
        .unwrap();
    let update = "unique_id,php_version,db_type,db_version,cms_version,server_os,modified\n\
                  a1,8.3.1,mysqli,8.0.35,5.0.1,Linux 6.1,2024-02-01 00:00:00\n";
    importer
        .import_reader(test_db.database_mut(), update.as_bytes())
        .unwrap();

    let request = ReportRequest::from_params("cms_version", false, true).unwrap();
    let response = StatsEngine::new()
        .render(test_db.database(), &request)
        .unwrap();
    let data = response.category(Category::CmsVersion).unwrap();
    assert_eq!(data.count("3.10.12"), None);
    assert_eq!(data.count("5.0.1"), Some(2));
    assert_eq!(response.total, 4);
}

#[test]
fn test_missing_file_is_an_error() {
    let mut test_db = TestDatabase::new("csv_missing").unwrap();
    let importer = SubmissionImporter::new(10).unwrap();
    let result = importer.import_file(
        test_db.database_mut(),
        std::path::Path::new("test_output/does_not_exist.csv"),
    );
    assert!(result.is_err());
}
