//! Export requests and their outcomes

use crate::core::export::definition::ExportDefinition;
use crate::domain::ids::{JobId, OrganizationId, RequesterId};
use crate::domain::job::{Audience, ExportIdentity, JobStatus};
use crate::domain::record::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Message returned to callers when generation fails outside diagnostic mode
pub const GENERIC_FAILURE_MESSAGE: &str = "The export could not be completed.";

/// Message returned when the job store cannot be reached
pub const UNAVAILABLE_MESSAGE: &str = "The export service is temporarily unavailable.";

/// One request to produce an export
///
/// # Examples
///
/// ```
/// use sheetforge::core::export::{ExportDefinition, ExportRequest};
/// use sheetforge::domain::{Audience, ExportType, FieldMapping, RequesterId};
/// use std::sync::Arc;
///
/// let definition = Arc::new(ExportDefinition::new(
///     ExportType::new("DailyAttendanceReport").unwrap(),
///     FieldMapping::from_paths(["timesheet_for"]).unwrap(),
/// ));
///
/// let request = ExportRequest::new(definition, RequesterId::new("user-1").unwrap())
///     .with_audience(Audience::from_selector(Some("hr")))
///     .with_name("April attendance");
///
/// assert_eq!(request.identity().audience, Audience::Admin);
/// ```
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Export being requested
    pub definition: Arc<ExportDefinition>,
    /// Requesting user
    pub requester_id: RequesterId,
    /// Audience selector
    pub audience: Audience,
    /// Organization scope
    pub organization_id: Option<OrganizationId>,
    /// Input records
    pub records: Vec<Record>,
    /// Custom job name
    pub export_name: Option<String>,
    /// Override for the definition's file name stem
    pub filename: Option<String>,
}

impl ExportRequest {
    /// Create a request for a normal user with no records
    pub fn new(definition: Arc<ExportDefinition>, requester_id: RequesterId) -> Self {
        Self {
            definition,
            requester_id,
            audience: Audience::NormalUser,
            organization_id: None,
            records: Vec::new(),
            export_name: None,
            filename: None,
        }
    }

    /// Set the audience
    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    /// Scope the export to an organization
    pub fn with_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Set the input records
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    /// Set a custom job name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.export_name = Some(name.into());
        self
    }

    /// Override the file name stem
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Dedup identity of this request
    pub fn identity(&self) -> ExportIdentity {
        ExportIdentity::new(
            self.definition.export_type.clone(),
            self.requester_id.clone(),
            self.audience,
            self.organization_id.clone(),
        )
    }

    /// File name stem for the generated file
    pub fn filename_stem(&self) -> &str {
        self.filename
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| self.definition.filename_stem())
    }
}

/// Result of [`request_export`](crate::core::export::ExportCoordinator::request_export)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExportOutcome {
    /// A previous Completed job matched; no job was created
    Cached {
        /// Job that produced the file
        job_id: JobId,
        /// File URL
        url: String,
        /// When that job was created
        created_on: DateTime<Utc>,
    },
    /// A job was created; `status` is its state when the call returned
    Accepted {
        /// New job
        job_id: JobId,
        /// Queued when dispatched to the background, otherwise terminal
        status: JobStatus,
    },
    /// The job was created but generation failed
    Failed {
        /// Failed job
        job_id: JobId,
        /// Caller-facing message
        message: String,
    },
    /// The job store could not be reached; no job exists
    Unavailable {
        /// Caller-facing message
        message: String,
    },
}

impl ExportOutcome {
    /// Job the outcome refers to, if any
    pub fn job_id(&self) -> Option<JobId> {
        match self {
            ExportOutcome::Cached { job_id, .. }
            | ExportOutcome::Accepted { job_id, .. }
            | ExportOutcome::Failed { job_id, .. } => Some(*job_id),
            ExportOutcome::Unavailable { .. } => None,
        }
    }
}
