//! Directory-backed job store
//!
//! Each job is one `{job_id}.json` document. Writes go to a temporary file
//! that is renamed into place, so a reader never sees a half-written job.

use crate::adapters::store::traits::{latest_completed, JobStore};
use crate::domain::errors::PersistenceError;
use crate::domain::ids::JobId;
use crate::domain::job::{ExportIdentity, ExportJob};
use crate::domain::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

const JOB_FILE_EXTENSION: &str = "json";

/// Job store writing one JSON file per job
#[derive(Debug, Clone)]
pub struct FileJobStore {
    root: PathBuf,
}

impl FileJobStore {
    /// Open (and create if needed) a store rooted at `root`
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the directory cannot be created.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            PersistenceError::Unavailable(format!(
                "Failed to create job directory {}: {e}",
                root.display()
            ))
        })?;

        tracing::debug!(root = %root.display(), "Opened file job store");
        Ok(Self { root })
    }

    fn job_path(&self, id: &JobId) -> PathBuf {
        self.root.join(format!("{id}.{JOB_FILE_EXTENSION}"))
    }

    async fn write_job(&self, job: &ExportJob) -> Result<()> {
        let body = serde_json::to_vec_pretty(job)
            .map_err(|e| PersistenceError::Corrupt(format!("{}: {e}", job.id)))?;
        let path = self.job_path(&job.id);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| PersistenceError::Unavailable(format!("{}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| PersistenceError::Unavailable(format!("{}: {e}", path.display())))?;
        Ok(())
    }

    async fn read_job(path: &Path) -> Result<ExportJob> {
        let body = tokio::fs::read(path)
            .await
            .map_err(|e| PersistenceError::Unavailable(format!("{}: {e}", path.display())))?;
        let job = serde_json::from_slice(&body)
            .map_err(|e| PersistenceError::Corrupt(format!("{}: {e}", path.display())))?;
        Ok(job)
    }

    async fn load_all(&self) -> Result<Vec<ExportJob>> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            PersistenceError::Unavailable(format!("{}: {e}", self.root.display()))
        })?;

        let mut jobs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(JOB_FILE_EXTENSION) {
                continue;
            }
            match Self::read_job(&path).await {
                Ok(job) => jobs.push(job),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable job file");
                }
            }
        }
        Ok(jobs)
    }
}

#[async_trait]
impl JobStore for FileJobStore {
    async fn create_job(&self, job: &ExportJob) -> Result<ExportJob> {
        if tokio::fs::try_exists(self.job_path(&job.id))
            .await
            .unwrap_or(false)
        {
            return Err(PersistenceError::Conflict(job.id.to_string()).into());
        }
        self.write_job(job).await?;
        Ok(job.clone())
    }

    async fn update_job(&self, job: &ExportJob) -> Result<ExportJob> {
        if !tokio::fs::try_exists(self.job_path(&job.id))
            .await
            .unwrap_or(false)
        {
            return Err(PersistenceError::NotFound(job.id.to_string()).into());
        }
        self.write_job(job).await?;
        Ok(job.clone())
    }

    async fn find_latest_completed(&self, identity: &ExportIdentity) -> Result<Option<ExportJob>> {
        let jobs = self.load_all().await?;
        Ok(latest_completed(jobs.iter(), identity))
    }

    async fn get_job(&self, id: &JobId) -> Result<Option<ExportJob>> {
        let path = self.job_path(id);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        Self::read_job(&path).await.map(Some)
    }

    async fn list_jobs(&self) -> Result<Vec<ExportJob>> {
        let mut jobs = self.load_all().await?;
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }
}
