//! Export coordinator - orchestrates one export request end to end
//!
//! Flow per request:
//!
//! 1. Validate the export definition (no job exists on rejection)
//! 2. Look up the latest Completed job for the identity; a hit is returned
//!    as [`ExportOutcome::Cached`]
//! 3. Create a Queued job, then `Processing`; with single-flight on, the
//!    identity is claimed before step 2
//! 4. Project records, sort, plan merges, hand the sheet to the writer
//! 5. `Completed` or `Failed`, then exactly one notification

use crate::adapters::notify::Notifier;
use crate::adapters::store::JobStore;
use crate::adapters::writer::{SheetRequest, SheetWriter};
use crate::core::export::definition::ExportDefinition;
use crate::core::export::notify;
use crate::core::export::request::{
    ExportOutcome, ExportRequest, GENERIC_FAILURE_MESSAGE, UNAVAILABLE_MESSAGE,
};
use crate::core::export::single_flight::InFlight;
use crate::core::export::tasks::BackgroundTasks;
use crate::core::merge::plan_with;
use crate::core::state::JobManager;
use crate::core::transform::{project, sort_rows};
use crate::domain::errors::SheetforgeError;
use crate::domain::ids::JobId;
use crate::domain::job::{ExportIdentity, ExportJob, FileLocation, JobStatus};
use crate::domain::table::Table;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Where job processing runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Processing finishes before `request_export` returns
    #[default]
    Inline,
    /// Processing runs on a spawned task; the caller gets a Queued job
    Background,
}

/// Coordinator behavior switches
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinatorSettings {
    /// Inline or background processing
    pub execution_mode: ExecutionMode,
    /// Return generation errors to the caller instead of a generic message
    pub diagnostic_mode: bool,
    /// Collapse concurrent identical requests onto one job
    pub single_flight: bool,
}

/// Export coordinator
///
/// Cheap to clone; clones share the store, writer, notifier and in-flight
/// registry.
#[derive(Clone)]
pub struct ExportCoordinator {
    jobs: JobManager,
    writer: Arc<dyn SheetWriter>,
    notifier: Arc<dyn Notifier>,
    settings: CoordinatorSettings,
    in_flight: InFlight,
    tasks: BackgroundTasks,
}

impl ExportCoordinator {
    /// Create a coordinator over its collaborators
    pub fn new(
        store: Arc<dyn JobStore>,
        writer: Arc<dyn SheetWriter>,
        notifier: Arc<dyn Notifier>,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            jobs: JobManager::new(store),
            writer,
            notifier,
            settings,
            in_flight: InFlight::new(),
            tasks: BackgroundTasks::new(),
        }
    }

    /// Active settings
    pub fn settings(&self) -> &CoordinatorSettings {
        &self.settings
    }

    /// Handle one export request
    ///
    /// # Errors
    ///
    /// Returns a validation error before any job is created if the export
    /// definition is inconsistent. In diagnostic mode, generation errors are
    /// returned after the job was marked Failed.
    pub async fn request_export(&self, request: ExportRequest) -> Result<ExportOutcome> {
        request.definition.validate()?;
        let identity = request.identity();
        let job = ExportJob::new(identity.clone(), request.export_name.as_deref());

        // Held across the cache lookup so a run finishing in between is seen as a hit
        let claim = if self.settings.single_flight {
            match self.in_flight.claim(&identity, job.id) {
                Ok(claim) => Some(claim),
                Err(existing) => return Ok(self.in_flight_outcome(existing).await),
            }
        } else {
            None
        };

        match self.jobs.latest_completed(&identity).await {
            Ok(Some(job)) => match &job.result_location {
                Some(location) => {
                    tracing::info!(
                        job_id = %job.id,
                        export_type = %identity.export_type,
                        requester_id = %identity.requester_id,
                        "Returning cached export"
                    );
                    return Ok(ExportOutcome::Cached {
                        job_id: job.id,
                        url: location.url.clone(),
                        created_on: job.created_at,
                    });
                }
                None => tracing::warn!(
                    job_id = %job.id,
                    "Completed job has no result location, generating a new export"
                ),
            },
            Ok(None) => {}
            Err(e) => {
                crate::log_error_with_context!(&e, "Job store lookup failed");
                return Ok(ExportOutcome::Unavailable {
                    message: UNAVAILABLE_MESSAGE.to_string(),
                });
            }
        }

        if let Err(e) = self.jobs.create(&job).await {
            crate::log_error_with_context!(&e, "Failed to create export job");
            return Ok(ExportOutcome::Unavailable {
                message: UNAVAILABLE_MESSAGE.to_string(),
            });
        }

        match self.settings.execution_mode {
            ExecutionMode::Inline => {
                let outcome = self.run_job(job, &request).await;
                drop(claim);
                outcome
            }
            ExecutionMode::Background => {
                let job_id = job.id;
                let coordinator = self.clone();
                self.tasks.spawn(async move {
                    let _claim = claim;
                    if let Err(e) = coordinator.run_job(job, &request).await {
                        tracing::error!(job_id = %job_id, error = %e, "Background export failed");
                    }
                });
                tracing::info!(job_id = %job_id, "Export dispatched to background");
                Ok(ExportOutcome::Accepted {
                    job_id,
                    status: JobStatus::Queued,
                })
            }
        }
    }

    /// Wait for every background job to reach a terminal state
    ///
    /// Call before the runtime shuts down; a job abandoned mid-flight would
    /// stay Processing in the store.
    pub async fn drain(&self) {
        let active = self.tasks.active();
        if active > 0 {
            tracing::info!(active, "Waiting for background exports to finish");
        }
        self.tasks.wait_idle().await;
    }

    /// Latest Completed job for an identity, without generating anything
    pub async fn get_latest_export(&self, identity: &ExportIdentity) -> Result<Option<ExportJob>> {
        self.jobs.latest_completed(identity).await
    }

    /// Job by ID, for polling an accepted export
    pub async fn get_job(&self, job_id: &JobId) -> Result<Option<ExportJob>> {
        self.jobs.get(job_id).await
    }

    /// All known jobs, newest first
    pub async fn list_jobs(&self) -> Result<Vec<ExportJob>> {
        self.jobs.list().await
    }

    async fn in_flight_outcome(&self, job_id: JobId) -> ExportOutcome {
        let status = match self.jobs.get(&job_id).await {
            Ok(Some(job)) => job.status,
            _ => JobStatus::Queued,
        };
        tracing::info!(job_id = %job_id, status = %status, "Identical export already in flight");
        ExportOutcome::Accepted { job_id, status }
    }

    async fn run_job(&self, mut job: ExportJob, request: &ExportRequest) -> Result<ExportOutcome> {
        let started = Instant::now();
        crate::log_export_start!(&job);

        let result: Result<()> = async {
            self.jobs.start(&mut job).await?;
            let location = self.generate(request).await?;
            self.jobs.complete(&mut job, location).await
        }
        .await;

        match result {
            Ok(()) => {
                crate::log_export_complete!(request.records.len(), started.elapsed());
                self.dispatch(&job, &request.definition, true).await;
                Ok(ExportOutcome::Accepted {
                    job_id: job.id,
                    status: job.status,
                })
            }
            Err(err) => self.handle_failure(job, &request.definition, err).await,
        }
    }

    async fn generate(&self, request: &ExportRequest) -> Result<FileLocation> {
        let definition = &request.definition;

        let mut table = project(&request.records, &definition.fields);
        sort_rows(&mut table, &definition.sort_by)?;

        let merges = match &definition.merge {
            Some(spec) => plan_with(
                table.rows(),
                sheet_column(&table, &spec.group_by)?,
                sheet_column(&table, spec.merge_header())?,
                spec.trailing,
            ),
            None => Vec::new(),
        };

        tracing::debug!(
            rows = table.len(),
            columns = table.headers().len(),
            merges = merges.len(),
            "Sheet prepared"
        );

        self.writer
            .write(SheetRequest {
                table,
                merges,
                sheet_title: definition.sheet_title().to_string(),
                filename_stem: request.filename_stem().to_string(),
                description: definition.description.clone(),
                header_notes: definition.header_notes.clone(),
                footer: definition.footer.clone(),
            })
            .await
    }

    async fn handle_failure(
        &self,
        mut job: ExportJob,
        definition: &ExportDefinition,
        err: SheetforgeError,
    ) -> Result<ExportOutcome> {
        let message = err.to_string();
        let trace = err.trace();
        tracing::error!(job_id = %job.id, error = %message, trace = %trace, "Export job failed");

        match self.jobs.fail(&mut job, &message, &trace).await {
            Ok(()) => self.dispatch(&job, definition, false).await,
            Err(e) => crate::log_error_with_context!(&e, "Failed to record export failure"),
        }

        if self.settings.diagnostic_mode {
            return Err(err);
        }
        Ok(ExportOutcome::Failed {
            job_id: job.id,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        })
    }

    async fn dispatch(&self, job: &ExportJob, definition: &ExportDefinition, succeeded: bool) {
        let notification = notify::compose(job, definition, succeeded);
        if let Err(e) = self.notifier.notify(&notification).await {
            tracing::warn!(job_id = %job.id, error = %e, "Notification delivery failed");
        }
    }
}

/// 1-based sheet column of a header
fn sheet_column(table: &Table, header: &str) -> Result<usize> {
    table
        .column_of(header)
        .map(|index| index + 1)
        .ok_or_else(|| SheetforgeError::Validation(format!("Unknown merge header '{header}'")))
}
