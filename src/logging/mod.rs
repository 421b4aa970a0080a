//! Logging and observability
//!
//! Structured logging through `tracing`: a console layer plus an optional
//! rolling JSON file layer. The macros below keep the field names of
//! recurring job events consistent.
//!
//! # Example
//!
//! ```no_run
//! use sheetforge::logging::init_logging;
//! use sheetforge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(export_type = "DailyAttendanceReport", "Export requested");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of job processing
///
/// # Example
///
/// ```no_run
/// use sheetforge::log_export_start;
/// use sheetforge::domain::{Audience, ExportIdentity, ExportJob, ExportType, RequesterId};
///
/// let identity = ExportIdentity::new(
///     ExportType::new("DailyAttendanceReport").unwrap(),
///     RequesterId::new("user-1").unwrap(),
///     Audience::NormalUser,
///     None,
/// );
/// let job = ExportJob::new(identity, None);
/// log_export_start!(&job);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($job:expr) => {
        tracing::info!(
            job_id = %$job.id,
            export_type = %$job.identity.export_type,
            audience = %$job.identity.audience,
            "Starting export"
        );
    };
}

/// Log a completed export
///
/// # Example
///
/// ```no_run
/// use sheetforge::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(42usize, Duration::from_millis(350));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($rows:expr, $duration:expr) => {
        tracing::info!(
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log a job reaching a terminal state
#[macro_export]
macro_rules! log_job_transition {
    ($job:expr) => {
        tracing::info!(
            job_id = %$job.id,
            status = %$job.status,
            name = %$job.name,
            "Export job finished"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use sheetforge::log_error_with_context;
/// use sheetforge::domain::SheetforgeError;
///
/// let error = SheetforgeError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        )
    };
}
