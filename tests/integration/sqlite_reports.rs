//! Reports rendered straight from the SQLite submission store

use chrono::{Duration, Utc};
use cms_stats::database::{RecentWindow, StatisticsOperations, SubmissionOperations};
use cms_stats::stats::{ReportRequest, StatsEngine, TotalPolicy};
use cms_stats::types::{Category, Submission};
use serde_json::json;

use crate::common::database::TestDatabase;
use crate::common::fixtures::{mixed_installations, submission};

fn report(test_db: &TestDatabase, source: &str, recent: bool, raw: bool) -> serde_json::Value {
    let request = ReportRequest::from_params(source, recent, raw).unwrap();
    let response = StatsEngine::new()
        .render(test_db.database(), &request)
        .unwrap();
    serde_json::to_value(&response).unwrap()
}

#[test]
fn test_single_category_reports() {
    let test_db = TestDatabase::seeded("sqlite_single", &mixed_installations()).unwrap();

    assert_eq!(
        report(&test_db, "php_version", false, false)["data"],
        json!({"php_version": {"7.4": 60.0, "8.0": 40.0}, "total": 10})
    );
    assert_eq!(
        report(&test_db, "server_os", false, false)["data"],
        json!({"server_os": {"Linux": 70.0, "Windows": 20.0, "unknown": 10.0}, "total": 10})
    );
    assert_eq!(
        report(&test_db, "db_type", false, false)["data"],
        json!({"db_type": {"mysqli": 80.0, "pgsql": 20.0}, "total": 10})
    );
}

#[test]
fn test_combined_report_from_store() {
    let test_db = TestDatabase::seeded("sqlite_combined", &mixed_installations()).unwrap();

    assert_eq!(
        report(&test_db, "cms_php", false, false)["data"],
        json!({
            "3.9.1": {"7.4.1": 2},
            "3.9.2": {"7.4.9": 2},
            "4.0.0": {"7.4.20": 2, "8.0.0": 1},
            "4.0.1": {"8.0.0": 1, "8.0.3": 2},
            "total": 10
        })
    );
}

#[test]
fn test_full_report_from_store() {
    let test_db = TestDatabase::seeded("sqlite_full", &mixed_installations()).unwrap();

    let value = report(&test_db, "", false, false);
    assert_eq!(value["data"]["total"], json!(10));
    assert_eq!(value["data"]["cms_version"], json!({"3.9": 40.0, "4.0": 60.0}));
    assert_eq!(value["data"]["php_version"], json!({"7.4": 60.0, "8.0": 40.0}));

    // Every group sums to the row count, so the cumulative policy multiplies it
    let request = ReportRequest::from_params("", false, false).unwrap();
    let cumulative = StatsEngine::with_total_policy(TotalPolicy::Cumulative)
        .render(test_db.database(), &request)
        .unwrap();
    assert_eq!(cumulative.total, 50);
}

#[test]
fn test_raw_report_from_store() {
    let test_db = TestDatabase::seeded("sqlite_raw", &mixed_installations()).unwrap();

    let value = report(&test_db, "cms_version", false, true);
    let entries = value["data"]["cms_version"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert!(entries.contains(&json!({"name": "4.0.1", "count": 3})));
    assert_eq!(value["data"]["total"], json!(10));
}

#[test]
fn test_missing_values_are_excluded_from_total() {
    let submissions = vec![
        submission("a", "8.1.2", "mysqli", "8.0.30", "4.2.0", "Linux 6.1"),
        Submission::new("b").with(Category::CmsVersion, "4.2.1"),
    ];
    let test_db = TestDatabase::seeded("sqlite_missing", &submissions).unwrap();

    assert_eq!(
        report(&test_db, "php_version", false, false)["data"],
        json!({"php_version": {"8.1": 100.0}, "total": 1})
    );
    assert_eq!(
        report(&test_db, "cms_version", false, false)["data"],
        json!({"cms_version": {"4.2": 100.0}, "total": 2})
    );
}

#[test]
fn test_recently_updated_window() {
    let mut test_db = TestDatabase::with_recent_window(
        "sqlite_recent",
        RecentWindow {
            days: 30,
            default_category: Category::CmsVersion,
        },
    )
    .unwrap();
    let mut stale = submission("old", "5.6.40", "mysql", "5.5.62", "3.4.8", "Linux 3.10");
    stale.modified = Some(Utc::now() - Duration::days(365));
    test_db
        .database_mut()
        .insert_submissions_batch(&[
            submission("new-1", "8.1.2", "mysqli", "8.0.30", "4.2.0", "Linux 6.1"),
            submission("new-2", "8.2.0", "mysqli", "8.0.31", "4.2.1", "Linux 6.1"),
            stale,
        ])
        .unwrap();

    assert_eq!(
        report(&test_db, "", true, false)["data"],
        json!({"cms_version": {"4.2": 100.0}, "total": 2})
    );
    assert_eq!(
        report(&test_db, "php_version", true, false)["data"],
        json!({"php_version": {"8.1": 50.0, "8.2": 50.0}, "total": 2})
    );
}

#[test]
fn test_resubmission_replaces_previous_values() {
    let mut test_db = TestDatabase::seeded("sqlite_upsert", &mixed_installations()).unwrap();
    let upgraded = submission("site-01", "8.0.3", "mysqli", "8.0.22", "4.0.1", "Linux 5.15");
    test_db.database_mut().upsert_submission(&upgraded).unwrap();

    let stored = test_db.database().get_submission("site-01").unwrap().unwrap();
    assert_eq!(stored.php_version.as_deref(), Some("8.0.3"));

    let stats = test_db.database().get_database_stats().unwrap();
    assert_eq!(stats.total_submissions, 10);
    assert_eq!(
        report(&test_db, "php_version", false, false)["data"],
        json!({"php_version": {"7.4": 50.0, "8.0": 50.0}, "total": 10})
    );
}
