//! Export job entity and its state machine
//!
//! A job moves `Queued → Processing → {Completed | Failed}` exactly once.
//! Terminal states have no exits; an illegal transition returns
//! [`SheetforgeError::InvalidTransition`] and leaves the job untouched.

use crate::domain::errors::SheetforgeError;
use crate::domain::ids::{ExportType, JobId, OrganizationId, RequesterId};
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visibility/recipient class of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// Regular user exporting their own data
    #[default]
    NormalUser,
    /// Administrative (HR) export, notified organization-wide
    Admin,
    /// Supervisor export
    Supervisor,
}

impl Audience {
    /// Map a request selector to an audience
    ///
    /// `hr`/`admin` select [`Audience::Admin`], `supervisor` selects
    /// [`Audience::Supervisor`]; anything else, including no selector, is a
    /// normal user export.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("hr") | Some("admin") => Audience::Admin,
            Some("supervisor") => Audience::Supervisor,
            _ => Audience::NormalUser,
        }
    }

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::NormalUser => "normal_user",
            Audience::Admin => "admin",
            Audience::Supervisor => "supervisor",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal_user" | "normal-user" | "user" => Ok(Audience::NormalUser),
            "admin" | "hr" => Ok(Audience::Admin),
            "supervisor" => Ok(Audience::Supervisor),
            other => Err(format!(
                "Invalid audience '{other}'. Must be one of: normal-user, admin, supervisor"
            )),
        }
    }
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Created, not yet started
    Queued,
    /// Projection and file generation under way
    Processing,
    /// File generated and persisted
    Completed,
    /// Generation failed
    Failed,
}

impl JobStatus {
    /// Whether no further transition may occur
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Dedup key of an export: (type, requester, audience, organization)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportIdentity {
    /// Export type
    pub export_type: ExportType,
    /// Requesting user
    pub requester_id: RequesterId,
    /// Audience selector
    pub audience: Audience,
    /// Organization scope, if any
    pub organization_id: Option<OrganizationId>,
}

impl ExportIdentity {
    /// Create an identity tuple
    pub fn new(
        export_type: ExportType,
        requester_id: RequesterId,
        audience: Audience,
        organization_id: Option<OrganizationId>,
    ) -> Self {
        Self {
            export_type,
            requester_id,
            audience,
            organization_id,
        }
    }
}

/// Where a completed export's file lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLocation {
    /// Filesystem path of the written file
    pub path: String,
    /// URL the file is served from
    pub url: String,
}

/// One export generation attempt
///
/// # Examples
///
/// ```
/// use sheetforge::domain::job::{Audience, ExportIdentity, ExportJob, FileLocation, JobStatus};
/// use sheetforge::domain::ids::{ExportType, RequesterId};
///
/// let identity = ExportIdentity::new(
///     ExportType::new("DailyAttendance").unwrap(),
///     RequesterId::new("user-1").unwrap(),
///     Audience::NormalUser,
///     None,
/// );
/// let mut job = ExportJob::new(identity, None);
/// assert_eq!(job.status, JobStatus::Queued);
///
/// job.start_processing().unwrap();
/// job.complete(FileLocation { path: "/tmp/a.xlsx".into(), url: "/media/a.xlsx".into() }).unwrap();
/// assert!(job.status.is_terminal());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportJob {
    /// Job ID
    pub id: JobId,
    /// Human-readable name; falls back to the export type
    pub name: String,
    /// Identity tuple used for dedup
    pub identity: ExportIdentity,
    /// Lifecycle status
    pub status: JobStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Time of the last state change
    pub modified_at: DateTime<Utc>,
    /// Result file, set only when Completed
    pub result_location: Option<FileLocation>,
    /// Failure message, set only when Failed
    pub error_message: Option<String>,
    /// Full failure trace for operators, set only when Failed
    pub error_trace: Option<String>,
}

impl ExportJob {
    /// Create a job in `Queued`
    pub fn new(identity: ExportIdentity, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| identity.export_type.to_string());
        let now = Utc::now();

        Self {
            id: JobId::new_v4(),
            name,
            identity,
            status: JobStatus::Queued,
            created_at: now,
            modified_at: now,
            result_location: None,
            error_message: None,
            error_trace: None,
        }
    }

    /// `Queued → Processing`
    pub fn start_processing(&mut self) -> Result<()> {
        self.transition(JobStatus::Processing)
    }

    /// `Processing → Completed`, setting the result location
    pub fn complete(&mut self, location: FileLocation) -> Result<()> {
        self.transition(JobStatus::Completed)?;
        self.result_location = Some(location);
        Ok(())
    }

    /// `Queued | Processing → Failed`, recording message and trace
    pub fn fail(&mut self, message: impl Into<String>, trace: impl Into<String>) -> Result<()> {
        self.transition(JobStatus::Failed)?;
        self.error_message = Some(message.into());
        self.error_trace = Some(trace.into());
        Ok(())
    }

    fn transition(&mut self, to: JobStatus) -> Result<()> {
        let allowed = matches!(
            (self.status, to),
            (JobStatus::Queued, JobStatus::Processing)
                | (JobStatus::Processing, JobStatus::Completed)
                | (JobStatus::Queued, JobStatus::Failed)
                | (JobStatus::Processing, JobStatus::Failed)
        );
        if !allowed {
            return Err(SheetforgeError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }

        tracing::debug!(
            job_id = %self.id,
            from = %self.status,
            to = %to,
            "Job transition"
        );
        self.status = to;
        self.modified_at = Utc::now();
        Ok(())
    }
}
