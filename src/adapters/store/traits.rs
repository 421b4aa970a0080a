//! Job store abstraction
//!
//! The store is a passive collaborator: it durably records whatever job
//! state the coordinator asserts, as whole-record upserts.

use crate::domain::ids::JobId;
use crate::domain::job::{ExportIdentity, ExportJob};
use crate::domain::Result;
use async_trait::async_trait;

/// Persistent job store
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist a newly created job
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the store is unavailable or the job ID
    /// already exists.
    async fn create_job(&self, job: &ExportJob) -> Result<ExportJob>;

    /// Overwrite an existing job with the given state
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the store is unavailable or the job was
    /// never created.
    async fn update_job(&self, job: &ExportJob) -> Result<ExportJob>;

    /// Most recent Completed job for an identity tuple
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` when no completed job matches.
    async fn find_latest_completed(&self, identity: &ExportIdentity) -> Result<Option<ExportJob>>;

    /// Load a job by ID
    async fn get_job(&self, id: &JobId) -> Result<Option<ExportJob>>;

    /// All jobs, newest first
    async fn list_jobs(&self) -> Result<Vec<ExportJob>>;
}

/// Pick the newest completed job matching an identity
pub(crate) fn latest_completed<'a, I>(jobs: I, identity: &ExportIdentity) -> Option<ExportJob>
where
    I: IntoIterator<Item = &'a ExportJob>,
{
    jobs.into_iter()
        .filter(|job| {
            job.status == crate::domain::job::JobStatus::Completed && job.identity == *identity
        })
        .max_by_key(|job| job.modified_at)
        .cloned()
}
