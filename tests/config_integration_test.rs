//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use secrecy::ExposeSecret;
use sheetforge::config::{load_config, NotificationBackend, StoreBackend};
use sheetforge::core::export::ExecutionMode;
use sheetforge::core::merge::TrailingRun;
use sheetforge::domain::ExportType;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("SHEETFORGE_APPLICATION_LOG_LEVEL");
    std::env::remove_var("SHEETFORGE_APPLICATION_DIAGNOSTIC_MODE");
    std::env::remove_var("SHEETFORGE_EXPORT_EXECUTION_MODE");
    std::env::remove_var("SHEETFORGE_EXPORT_SINGLE_FLIGHT");
    std::env::remove_var("SHEETFORGE_STORE_BACKEND");
    std::env::remove_var("SHEETFORGE_NOTIFICATION_WEBHOOK_TOKEN");
    std::env::remove_var("TEST_WEBHOOK_TOKEN");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
diagnostic_mode = true

[export]
output_dir = "/srv/media/exports"
public_base_url = "https://files.example.com/media"
execution_mode = "background"
single_flight = true

[store]
backend = "file"
path = "/srv/sheetforge/jobs"

[notification]
backend = "webhook"
webhook_url = "https://notify.example.com/hooks"
webhook_token = "plain-token"
timeout_seconds = 5

[logging]
local_enabled = true
local_path = "/var/log/sheetforge"
local_rotation = "hourly"

[[exports]]
export_type = "DailyAttendanceReport"
title = "Daily Attendance"
fields = [
    { path = "timesheet_for", header = "Date" },
    { path = "timesheet_user.full_name", header = "Full Name" },
]
sort_by = ["Full Name", "Date"]

[exports.merge]
group_by = "Full Name"
merge = "Date"
trailing = "drop"

[[exports]]
export_type = "LeaveBalance"
fields = [{ path = "user.full_name", header = "Name" }]
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.diagnostic_mode);
    assert_eq!(config.export.execution_mode, ExecutionMode::Background);
    assert!(config.export.single_flight);
    assert_eq!(config.store.backend, StoreBackend::File);
    assert_eq!(config.notification.backend, NotificationBackend::Webhook);
    assert_eq!(config.notification.timeout_seconds, 5);
    assert_eq!(config.logging.local_rotation, "hourly");

    assert_eq!(config.exports.len(), 2);
    let daily = config
        .find_export(&ExportType::new("DailyAttendanceReport").unwrap())
        .unwrap();
    let merge = daily.merge.as_ref().unwrap();
    assert_eq!(merge.merge_header(), "Date");
    assert_eq!(merge.trailing, TrailingRun::Drop);

    let settings = config.coordinator_settings();
    assert!(settings.diagnostic_mode);
    assert!(settings.single_flight);
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.diagnostic_mode);
    assert_eq!(config.export.output_dir, "./media");
    assert_eq!(config.export.public_base_url, "/media");
    assert_eq!(config.export.execution_mode, ExecutionMode::Inline);
    assert!(!config.export.single_flight);
    assert_eq!(config.store.backend, StoreBackend::Memory);
    assert_eq!(config.notification.backend, NotificationBackend::Log);
    assert!(!config.logging.local_enabled);
    assert!(config.exports.is_empty());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_WEBHOOK_TOKEN", "substituted-token");

    let file = write_config(
        r#"
[notification]
backend = "webhook"
webhook_url = "https://notify.example.com/hooks"
# webhook_token = "${UNSET_IN_COMMENT}"
webhook_token = "${TEST_WEBHOOK_TOKEN}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    let token = config.notification.webhook_token.as_ref().unwrap();
    assert_eq!(token.expose_secret().as_ref(), "substituted-token");

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[notification]
webhook_token = "${TEST_WEBHOOK_TOKEN}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_WEBHOOK_TOKEN"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("SHEETFORGE_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("SHEETFORGE_APPLICATION_DIAGNOSTIC_MODE", "true");
    std::env::set_var("SHEETFORGE_EXPORT_EXECUTION_MODE", "background");
    std::env::set_var("SHEETFORGE_EXPORT_SINGLE_FLIGHT", "true");

    let file = write_config(
        r#"
[application]
log_level = "debug"

[export]
execution_mode = "inline"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert!(config.application.diagnostic_mode);
    assert_eq!(config.export.execution_mode, ExecutionMode::Background);
    assert!(config.export.single_flight);

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    // Sort header missing from the field mapping
    let file = write_config(
        r#"
[[exports]]
export_type = "DailyAttendanceReport"
fields = [{ path = "timesheet_for", header = "Date" }]
sort_by = ["Full Name"]
"#,
    );
    assert!(load_config(file.path()).is_err());

    // File store without a path
    let file = write_config(
        r#"
[store]
backend = "file"
"#,
    );
    assert!(load_config(file.path()).is_err());

    // Duplicate headers
    let file = write_config(
        r#"
[[exports]]
export_type = "Duplicate"
fields = [
    { path = "a", header = "Name" },
    { path = "b", header = "Name" },
]
"#,
    );
    assert!(load_config(file.path()).is_err());
}
