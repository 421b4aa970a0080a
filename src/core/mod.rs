//! Core business logic for sheetforge.
//!
//! # Modules
//!
//! - [`transform`] - dotted-path resolution, row projection and sorting
//! - [`merge`] - run-length merge planning over a grouping column
//! - [`state`] - persisted job lifecycle
//! - [`export`] - request orchestration, caching and notifications
//!
//! # Export Workflow
//!
//! 1. **Validate**: the export definition must reference only mapped headers
//! 2. **Dedup**: a previous Completed job for the same identity is returned
//! 3. **Project**: records become rows in field-mapping order
//! 4. **Sort & plan**: optional ordering, then merge ranges over a column
//! 5. **Write**: the sheet writer produces the file and its URL
//! 6. **Finish**: the job is Completed or Failed and one notification is sent
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetforge::adapters::notify::TracingNotifier;
//! use sheetforge::adapters::store::MemoryJobStore;
//! use sheetforge::adapters::writer::XlsxSheetWriter;
//! use sheetforge::core::export::{
//!     CoordinatorSettings, ExportCoordinator, ExportDefinition, ExportRequest,
//! };
//! use sheetforge::domain::{ExportType, FieldMapping, Record, RequesterId};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = ExportCoordinator::new(
//!     Arc::new(MemoryJobStore::new()),
//!     Arc::new(XlsxSheetWriter::new("./media", "/media")),
//!     Arc::new(TracingNotifier::new()),
//!     CoordinatorSettings::default(),
//! );
//!
//! let definition = Arc::new(ExportDefinition::new(
//!     ExportType::new("DailyAttendanceReport")?,
//!     FieldMapping::from_pairs([("timesheet_user.full_name", "Full Name")])?,
//! ));
//! let request = ExportRequest::new(definition, RequesterId::new("user-1")?)
//!     .with_records(vec![Record::from(json!({"timesheet_user": {"full_name": "Ada"}}))]);
//!
//! let outcome = coordinator.request_export(request).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod merge;
pub mod state;
pub mod transform;
