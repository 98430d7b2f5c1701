//! Snapshots written from rendered reports

use chrono::{TimeZone, Utc};
use cms_stats::snapshot::SnapshotWriter;
use cms_stats::stats::{ReportRequest, StatsEngine};
use serde_json::json;

use crate::common::database::TestDatabase;
use crate::common::fixtures::mixed_installations;

#[test]
fn test_snapshot_matches_rendered_report() {
    let test_db = TestDatabase::seeded("snapshot_report", &mixed_installations()).unwrap();
    let snapshot_dir = tempfile::tempdir().unwrap();
    let writer = SnapshotWriter::new(snapshot_dir.path().join("daily"));
    let taken_at = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();

    let request = ReportRequest::from_params("db_type", false, false).unwrap();
    let response = StatsEngine::new()
        .render(test_db.database(), &request)
        .unwrap();
    let path = writer.write_at(&response, &request, &taken_at).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "20240301_060000_db_type.json"
    );
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({"data": {"db_type": {"mysqli": 80.0, "pgsql": 20.0}, "total": 10}})
    );
}

#[test]
fn test_snapshots_of_different_requests_do_not_collide() {
    let test_db = TestDatabase::seeded("snapshot_names", &mixed_installations()).unwrap();
    let snapshot_dir = tempfile::tempdir().unwrap();
    let writer = SnapshotWriter::new(snapshot_dir.path());
    let taken_at = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
    let engine = StatsEngine::new();

    for (source, recent) in [("", false), ("", true), ("cms_php", false)] {
        let request = ReportRequest::from_params(source, recent, false).unwrap();
        let response = engine.render(test_db.database(), &request).unwrap();
        writer.write_at(&response, &request, &taken_at).unwrap();
    }

    let mut names: Vec<String> = std::fs::read_dir(snapshot_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "20240301_060000.json",
            "20240301_060000_cms_php.json",
            "20240301_060000_recent.json",
        ]
    );
}
