//! In-process job store

use crate::adapters::store::traits::{latest_completed, JobStore};
use crate::domain::errors::PersistenceError;
use crate::domain::ids::JobId;
use crate::domain::job::{ExportIdentity, ExportJob};
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Job store backed by a map guarded by an async RwLock
///
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<JobId, ExportJob>>,
}

impl MemoryJobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored jobs
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Whether the store holds no jobs
    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create_job(&self, job: &ExportJob) -> Result<ExportJob> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(PersistenceError::Conflict(job.id.to_string()).into());
        }
        jobs.insert(job.id, job.clone());
        Ok(job.clone())
    }

    async fn update_job(&self, job: &ExportJob) -> Result<ExportJob> {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&job.id) {
            Some(stored) => {
                *stored = job.clone();
                Ok(job.clone())
            }
            None => Err(PersistenceError::NotFound(job.id.to_string()).into()),
        }
    }

    async fn find_latest_completed(&self, identity: &ExportIdentity) -> Result<Option<ExportJob>> {
        let jobs = self.jobs.read().await;
        Ok(latest_completed(jobs.values(), identity))
    }

    async fn get_job(&self, id: &JobId) -> Result<Option<ExportJob>> {
        Ok(self.jobs.read().await.get(id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<ExportJob>> {
        let mut jobs: Vec<ExportJob> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ExportType, RequesterId};
    use crate::domain::job::{Audience, FileLocation};
    use crate::domain::SheetforgeError;

    fn identity(requester: &str) -> ExportIdentity {
        ExportIdentity::new(
            ExportType::new("DailyAttendance").unwrap(),
            RequesterId::new(requester).unwrap(),
            Audience::NormalUser,
            None,
        )
    }

    fn completed(requester: &str, url: &str) -> ExportJob {
        let mut job = ExportJob::new(identity(requester), None);
        job.start_processing().unwrap();
        job.complete(FileLocation {
            path: format!("/tmp/{url}"),
            url: url.to_string(),
        })
        .unwrap();
        job
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryJobStore::new();
        let job = ExportJob::new(identity("u1"), None);
        store.create_job(&job).await.unwrap();

        assert_eq!(store.get_job(&job.id).await.unwrap(), Some(job));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_twice_conflicts() {
        let store = MemoryJobStore::new();
        let job = ExportJob::new(identity("u1"), None);
        store.create_job(&job).await.unwrap();

        let err = store.create_job(&job).await.unwrap_err();
        assert!(matches!(
            err,
            SheetforgeError::Persistence(PersistenceError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_job_fails() {
        let store = MemoryJobStore::new();
        let job = ExportJob::new(identity("u1"), None);
        let err = store.update_job(&job).await.unwrap_err();
        assert!(matches!(
            err,
            SheetforgeError::Persistence(PersistenceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_latest_completed_matches_identity_only() {
        let store = MemoryJobStore::new();
        let pending = ExportJob::new(identity("u1"), None);
        store.create_job(&pending).await.unwrap();
        store.create_job(&completed("u2", "other.xlsx")).await.unwrap();

        assert!(store
            .find_latest_completed(&identity("u1"))
            .await
            .unwrap()
            .is_none());

        let first = completed("u1", "first.xlsx");
        store.create_job(&first).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = completed("u1", "second.xlsx");
        store.create_job(&second).await.unwrap();

        let latest = store
            .find_latest_completed(&identity("u1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, second.id);
    }
}
