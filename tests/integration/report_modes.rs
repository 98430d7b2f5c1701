//! Report modes over an in-memory record source
//!
//! Covers the four reporting modes, raw versus sanitised output and the JSON
//! shape clients receive.

use cms_stats::database::InMemorySource;
use cms_stats::errors::AppError;
use cms_stats::stats::{ReportRequest, StatsEngine, TotalPolicy};
use cms_stats::types::{Category, CategoryData, CombinedRecord, CountRecord, NameCount};
use serde_json::json;

fn render(source: &InMemorySource, params: (&str, bool, bool)) -> serde_json::Value {
    let request = ReportRequest::from_params(params.0, params.1, params.2).unwrap();
    let response = StatsEngine::new().render(source, &request).unwrap();
    serde_json::to_value(&response).unwrap()
}

#[test]
fn test_php_versions_bucket_by_minor_branch() {
    let source = InMemorySource::with_items(vec![
        CountRecord::single(Category::PhpVersion, "7.4.1", 10),
        CountRecord::single(Category::PhpVersion, "7.4.9", 5),
        CountRecord::single(Category::PhpVersion, "8.0.0", 5),
    ]);

    assert_eq!(
        render(&source, ("php_version", false, false)),
        json!({"data": {"php_version": {"7.4": 75.0, "8.0": 25.0}, "total": 20}})
    );
}

#[test]
fn test_percentages_round_decimal_halves_up() {
    let source = InMemorySource::with_items(vec![
        CountRecord::single(Category::PhpVersion, "7.4.33", 23),
        CountRecord::single(Category::PhpVersion, "8.1.27", 137),
    ]);

    assert_eq!(
        render(&source, ("php_version", false, false)),
        json!({"data": {"php_version": {"7.4": 14.38, "8.1": 85.63}, "total": 160}})
    );
}

#[test]
fn test_blank_server_os_reports_as_unknown() {
    let source = InMemorySource::with_items(vec![
        CountRecord::single(Category::ServerOs, "", 3),
        CountRecord::single(Category::ServerOs, "Linux 5.4", 7),
    ]);

    assert_eq!(
        render(&source, ("server_os", false, false)),
        json!({"data": {"server_os": {"unknown": 30.0, "Linux": 70.0}, "total": 10}})
    );
}

#[test]
fn test_combined_cross_tabulation_is_never_sanitised() {
    let source = InMemorySource::with_combined(vec![
        CombinedRecord::new("3.9", "7.2", 4),
        CombinedRecord::new("3.9", "7.4", 6),
    ]);

    let expected = json!({"data": {"3.9": {"7.2": 4, "7.4": 6}, "total": 10}});
    assert_eq!(render(&source, ("cms_php", false, false)), expected);
    // Raw authorisation does not change the combined shape
    assert_eq!(render(&source, ("cms_php", false, true)), expected);
}

#[test]
fn test_combined_cms_version_named_total_is_dropped() {
    let source = InMemorySource::with_combined(vec![
        CombinedRecord::new("total", "7.2", 4),
        CombinedRecord::new("4.0", "8.1", 3),
    ]);

    assert_eq!(
        render(&source, ("cms_php", false, false)),
        json!({"data": {"4.0": {"8.1": 3}, "total": 3}})
    );
}

#[test]
fn test_authorised_raw_output_has_counts_only() {
    let source = InMemorySource::with_items(vec![CountRecord::single(Category::DbType, "mysql", 9)]);

    let value = render(&source, ("db_type", false, true));
    assert_eq!(
        value,
        json!({"data": {"db_type": [{"name": "mysql", "count": 9}], "total": 9}})
    );
    assert!(value["data"]["db_type"][0].get("percentage").is_none());
}

#[test]
fn test_falsy_names_count_towards_total_but_are_not_listed() {
    let source = InMemorySource::with_items(vec![
        CountRecord::single(Category::DbVersion, "0", 2),
        CountRecord::single(Category::DbVersion, "5.7.30", 6),
        CountRecord::single(Category::DbVersion, "", 4),
    ]);

    let request = ReportRequest::from_params("db_version", false, true).unwrap();
    let response = StatsEngine::new().render(&source, &request).unwrap();

    assert_eq!(response.total, 8);
    assert_eq!(
        response.category(Category::DbVersion),
        Some(&CategoryData::Raw(vec![NameCount::new("5.7.30", 6)]))
    );
}

#[test]
fn test_single_mode_reports_requested_category_even_when_empty() {
    let source = InMemorySource::new();
    assert_eq!(
        render(&source, ("cms_version", false, false)),
        json!({"data": {"cms_version": {}, "total": 0}})
    );
}

#[test]
fn test_full_report_covers_every_category() {
    let groups = Category::ALL
        .into_iter()
        .map(|category| vec![CountRecord::single(category, "1.0", 4)])
        .collect();
    let source = InMemorySource::with_groups(groups);

    let value = render(&source, ("", false, false));
    let data = value["data"].as_object().unwrap();
    assert_eq!(data.len(), Category::ALL.len() + 1);
    assert_eq!(value["data"]["total"], json!(4));
    assert_eq!(value["data"]["db_type"], json!({"1.0": 100.0}));
}

#[test]
fn test_full_report_total_policies() {
    let groups = vec![
        vec![CountRecord::single(Category::PhpVersion, "7.4.1", 2)],
        vec![CountRecord::single(Category::DbType, "mysqli", 8)],
    ];
    let source = InMemorySource::with_groups(groups);
    let request = ReportRequest::from_params("", false, false).unwrap();

    let last_group = StatsEngine::new().render(&source, &request).unwrap();
    assert_eq!(last_group.total, 8);
    assert_eq!(
        last_group.category(Category::PhpVersion).unwrap().percentage("7.4"),
        Some(25.0)
    );

    let cumulative = StatsEngine::with_total_policy(TotalPolicy::Cumulative)
        .render(&source, &request)
        .unwrap();
    assert_eq!(cumulative.total, 10);
    assert_eq!(
        cumulative.category(Category::PhpVersion).unwrap().percentage("7.4"),
        Some(20.0)
    );
    assert_eq!(
        cumulative.category(Category::DbType).unwrap().percentage("mysqli"),
        Some(80.0)
    );
}

#[test]
fn test_recent_mode_ignores_combined_source() {
    let source = InMemorySource {
        recent: vec![
            CountRecord::single(Category::CmsVersion, "4.0.1", 3),
            CountRecord::single(Category::CmsVersion, "4.0.2", 1),
        ],
        combined: vec![CombinedRecord::new("3.9", "7.2", 100)],
        ..InMemorySource::default()
    };

    assert_eq!(
        render(&source, ("cms_php", true, false)),
        json!({"data": {"cms_version": {"4.0": 100.0}, "total": 4}})
    );
}

#[test]
fn test_unknown_source_is_rejected() {
    for recent in [false, true] {
        let result = ReportRequest::from_params("mysql_version", recent, false);
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }
}
