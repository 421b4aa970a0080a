//! Export command implementation
//!
//! Runs one export request for a configured export type against a JSON
//! record file.

use crate::adapters::factory::create_coordinator;
use crate::config::load_config;
use crate::core::export::{
    ExportCoordinator, ExportDefinition, ExportOutcome, ExportRequest, GENERIC_FAILURE_MESSAGE,
};
use crate::domain::ids::{ExportType, JobId, OrganizationId, RequesterId};
use crate::domain::job::{Audience, JobStatus};
use crate::domain::record::Record;
use anyhow::Context;
use clap::Args;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Configured export type to run
    #[arg(short = 't', long)]
    pub export_type: String,

    /// Requesting user ID
    #[arg(short, long, env = "SHEETFORGE_REQUESTER")]
    pub requester: String,

    /// Audience selector (hr/admin, supervisor; anything else is a normal user)
    #[arg(long = "as", value_name = "SELECTOR")]
    pub exported_as: Option<String>,

    /// Organization the export is scoped to
    #[arg(long)]
    pub organization: Option<String>,

    /// JSON file holding an array of records
    #[arg(long, value_name = "FILE")]
    pub records: String,

    /// Custom job name
    #[arg(long)]
    pub name: Option<String>,

    /// File name stem override
    #[arg(long)]
    pub filename: Option<String>,

    /// Skip status polling for a background job (it still finishes before exit)
    #[arg(long)]
    pub detach: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(export_type = %self.export_type, "Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let export_type = ExportType::new(self.export_type.as_str()).map_err(anyhow::Error::msg)?;
        let Some(definition) = config.find_export(&export_type) else {
            eprintln!("❌ Export type '{export_type}' is not configured");
            return Ok(2);
        };

        let records = load_records(&self.records).await?;
        let request = self.build_request(Arc::new(definition.clone()), records)?;

        let coordinator = match create_coordinator(&config).await {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to initialize export: {e}");
                return Ok(4);
            }
        };

        let mut outcome = match coordinator.request_export(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("❌ Export failed: {e}");
                return Ok(1);
            }
        };

        if let ExportOutcome::Accepted {
            job_id,
            status: JobStatus::Queued | JobStatus::Processing,
        } = outcome
        {
            if !self.detach {
                outcome = wait_for_job(&coordinator, job_id).await?;
            }
        }

        let code = self.report(&outcome);
        coordinator.drain().await;
        Ok(code)
    }

    fn build_request(
        &self,
        definition: Arc<ExportDefinition>,
        records: Vec<Record>,
    ) -> anyhow::Result<ExportRequest> {
        let requester = RequesterId::new(self.requester.as_str()).map_err(anyhow::Error::msg)?;
        let mut request = ExportRequest::new(definition, requester)
            .with_audience(Audience::from_selector(self.exported_as.as_deref()))
            .with_records(records);

        if let Some(organization) = &self.organization {
            request = request.with_organization(
                OrganizationId::new(organization.as_str()).map_err(anyhow::Error::msg)?,
            );
        }
        if let Some(name) = &self.name {
            request = request.with_name(name);
        }
        if let Some(filename) = &self.filename {
            request = request.with_filename(filename);
        }
        Ok(request)
    }

    fn report(&self, outcome: &ExportOutcome) -> i32 {
        if self.json {
            match serde_json::to_string_pretty(outcome) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Failed to serialize outcome: {e}"),
            }
        } else {
            match outcome {
                ExportOutcome::Cached {
                    url, created_on, ..
                } => {
                    println!("✅ Export already available (generated {created_on})");
                    println!("   {url}");
                }
                ExportOutcome::Accepted { job_id, status } => match status {
                    JobStatus::Completed => println!("✅ Export completed: job {job_id}"),
                    _ => {
                        println!("🚀 Your request is being processed in the background.");
                        println!("   Job {job_id} is {status}");
                    }
                },
                ExportOutcome::Failed { job_id, message } => {
                    println!("❌ {message} (job {job_id})");
                }
                ExportOutcome::Unavailable { message } => println!("⚠️  {message}"),
            }
        }

        match outcome {
            ExportOutcome::Cached { .. } | ExportOutcome::Accepted { .. } => 0,
            ExportOutcome::Failed { .. } => 1,
            ExportOutcome::Unavailable { .. } => 3,
        }
    }
}

/// Read a record file: a JSON array, or a single object taken as one record
async fn load_records(path: impl AsRef<Path>) -> anyhow::Result<Vec<Record>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let records = match value {
        serde_json::Value::Array(items) => items.into_iter().map(Record::from).collect(),
        other => vec![Record::from(other)],
    };
    tracing::debug!(count = records.len(), path = %path.display(), "Loaded records");
    Ok(records)
}

/// Poll a background job until it reaches a terminal state
async fn wait_for_job(coordinator: &ExportCoordinator, job_id: JobId) -> anyhow::Result<ExportOutcome> {
    loop {
        match coordinator.get_job(&job_id).await? {
            Some(job) if job.status == JobStatus::Failed => {
                return Ok(ExportOutcome::Failed {
                    job_id,
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                })
            }
            Some(job) if job.status.is_terminal() => {
                return Ok(ExportOutcome::Accepted {
                    job_id,
                    status: job.status,
                })
            }
            Some(_) => tokio::time::sleep(POLL_INTERVAL).await,
            None => anyhow::bail!("Job {job_id} disappeared from the job store"),
        }
    }
}
