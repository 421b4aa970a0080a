//! Job manager for persisted job state
//!
//! Wraps a [`JobStore`] and pairs every state-machine transition with the
//! store write that records it. A transition is applied to a copy first and
//! only adopted once the store accepted it, so the in-memory job never runs
//! ahead of what was persisted.

use crate::adapters::store::JobStore;
use crate::domain::ids::JobId;
use crate::domain::job::{ExportIdentity, ExportJob, FileLocation};
use crate::domain::Result;
use std::sync::Arc;

/// Persists job lifecycle transitions
#[derive(Clone)]
pub struct JobManager {
    store: Arc<dyn JobStore>,
}

impl JobManager {
    /// Create a manager over a job store
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Persist a freshly created (Queued) job
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the store rejects the job.
    pub async fn create(&self, job: &ExportJob) -> Result<()> {
        self.store.create_job(job).await?;
        tracing::info!(
            job_id = %job.id,
            export_type = %job.identity.export_type,
            requester_id = %job.identity.requester_id,
            audience = %job.identity.audience,
            "Export job created"
        );
        Ok(())
    }

    /// `Queued → Processing`
    pub async fn start(&self, job: &mut ExportJob) -> Result<()> {
        self.persist(job, |next| next.start_processing()).await
    }

    /// `Processing → Completed`
    pub async fn complete(&self, job: &mut ExportJob, location: FileLocation) -> Result<()> {
        self.persist(job, move |next| next.complete(location)).await?;
        crate::log_job_transition!(job);
        Ok(())
    }

    /// `Queued | Processing → Failed`
    pub async fn fail(&self, job: &mut ExportJob, message: &str, trace: &str) -> Result<()> {
        self.persist(job, |next| next.fail(message, trace)).await?;
        crate::log_job_transition!(job);
        Ok(())
    }

    /// Most recent Completed job for an identity
    pub async fn latest_completed(&self, identity: &ExportIdentity) -> Result<Option<ExportJob>> {
        self.store.find_latest_completed(identity).await
    }

    /// Load a job by ID
    pub async fn get(&self, id: &JobId) -> Result<Option<ExportJob>> {
        self.store.get_job(id).await
    }

    /// All stored jobs, newest first
    pub async fn list(&self) -> Result<Vec<ExportJob>> {
        self.store.list_jobs().await
    }

    async fn persist<F>(&self, job: &mut ExportJob, apply: F) -> Result<()>
    where
        F: FnOnce(&mut ExportJob) -> Result<()>,
    {
        let mut next = job.clone();
        apply(&mut next)?;
        self.store.update_job(&next).await?;
        *job = next;
        Ok(())
    }
}
