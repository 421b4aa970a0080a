//! End-to-end exports through the configured file store and xlsx writer

use serde_json::json;
use sheetforge::adapters::factory::create_coordinator;
use sheetforge::adapters::store::{FileJobStore, JobStore};
use sheetforge::config::load_config_str;
use sheetforge::core::export::{ExportOutcome, ExportRequest};
use sheetforge::domain::{ExportType, JobStatus, Record, RequesterId};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn config_toml(root: &Path) -> String {
    format!(
        r#"
[export]
output_dir = "{media}"
public_base_url = "/media"

[store]
backend = "file"
path = "{jobs}"

[[exports]]
export_type = "DailyAttendanceReport"
title = "Daily Attendance"
filename_stem = "attendance_report"
fields = [
    {{ path = "timesheet_user.full_name", header = "Full Name" }},
    {{ path = "timesheet_for", header = "Date" }},
    {{ path = "timesheet_user.organization", header = "Organization" }},
]
sort_by = ["Full Name", "Date"]
description = ["November attendance"]

footer = ["Generated by sheetforge"]

[exports.merge]
group_by = "Full Name"

[[exports.header_notes]]
header = "Date"
text = "Calendar date of the timesheet"
author = "HR Team"
"#,
        media = root.join("media").display(),
        jobs = root.join("jobs").display(),
    )
}

fn records() -> Vec<Record> {
    vec![
        Record::from(json!({
            "timesheet_for": "2024-11-02",
            "timesheet_user": {"full_name": "Alice Brown", "organization": {"name": "Aayu"}}
        })),
        Record::from(json!({
            "timesheet_for": "2024-11-01",
            "timesheet_user": {"full_name": "Alice Brown", "organization": {}}
        })),
        Record::from(json!({"timesheet_for": "2024-11-01"})),
    ]
}

#[tokio::test]
async fn test_export_writes_workbook_and_persists_job() {
    let dir = TempDir::new().unwrap();
    let config = load_config_str(&config_toml(dir.path())).unwrap();
    let coordinator = create_coordinator(&config).await.unwrap();

    let definition = config
        .find_export(&ExportType::new("DailyAttendanceReport").unwrap())
        .unwrap()
        .clone();
    let request = ExportRequest::new(Arc::new(definition.clone()), RequesterId::new("user-1").unwrap())
        .with_records(records());

    let outcome = coordinator.request_export(request).await.unwrap();
    let job_id = outcome.job_id().unwrap();
    assert!(matches!(
        outcome,
        ExportOutcome::Accepted {
            status: JobStatus::Completed,
            ..
        }
    ));

    // The job survives in a freshly opened store
    let store = FileJobStore::open(dir.path().join("jobs")).await.unwrap();
    let job = store.get_job(&job_id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Completed);

    let location = job.result_location.unwrap();
    let file_name = Path::new(&location.path).file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("attendance_report_"));
    assert!(file_name.ends_with(".xlsx"));
    assert_eq!(location.url, format!("/media/{file_name}"));

    let bytes = std::fs::read(&location.path).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    // Same identity again is served from the stored job
    let request = ExportRequest::new(Arc::new(definition), RequesterId::new("user-1").unwrap())
        .with_records(records());
    let again = coordinator.request_export(request).await.unwrap();
    match again {
        ExportOutcome::Cached { job_id: cached, url, .. } => {
            assert_eq!(cached, job_id);
            assert_eq!(url, location.url);
        }
        other => panic!("expected cache hit, got {other:?}"),
    }
    assert_eq!(store.list_jobs().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unwritable_output_dir_fails_job() {
    let dir = TempDir::new().unwrap();
    // A regular file where the output directory should be
    std::fs::write(dir.path().join("media"), b"not a directory").unwrap();

    let config = load_config_str(&config_toml(dir.path())).unwrap();
    let coordinator = create_coordinator(&config).await.unwrap();
    let definition = config.exports[0].clone();

    let request = ExportRequest::new(Arc::new(definition), RequesterId::new("user-1").unwrap())
        .with_records(records());
    let outcome = coordinator.request_export(request).await.unwrap();

    let ExportOutcome::Failed { job_id, .. } = outcome else {
        panic!("expected failed export");
    };
    let job = coordinator.get_job(&job_id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error_trace.is_some());
}
