//! Status command implementation
//!
//! Shows one job by ID, or lists the jobs in the configured store.

use crate::adapters::factory::create_job_store;
use crate::config::load_config;
use crate::domain::ids::JobId;
use crate::domain::job::{ExportJob, JobStatus};
use clap::Args;
use std::str::FromStr;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show a single job
    #[arg(long)]
    pub job_id: Option<String>,

    /// Filter by export type
    #[arg(long)]
    pub export_type: Option<String>,

    /// Filter by requester
    #[arg(long)]
    pub requester: Option<String>,

    /// Print jobs as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let store = match create_job_store(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to open job store");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        if let Some(raw_id) = &self.job_id {
            let job_id = match JobId::from_str(raw_id) {
                Ok(id) => id,
                Err(e) => {
                    println!("❌ {e}");
                    return Ok(2);
                }
            };
            return match store.get_job(&job_id).await? {
                Some(job) => {
                    self.print_job(&job)?;
                    Ok(0)
                }
                None => {
                    println!("No job found with ID {job_id}");
                    Ok(1)
                }
            };
        }

        let jobs: Vec<ExportJob> = store
            .list_jobs()
            .await?
            .into_iter()
            .filter(|job| self.matches(job))
            .collect();

        if jobs.is_empty() {
            println!("No export jobs found.");
            return Ok(0);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&jobs)?);
            return Ok(0);
        }

        println!("📊 Found {} job(s):", jobs.len());
        println!();
        println!(
            "{:<38} {:<28} {:<16} {:<14} {:<20}",
            "Job ID", "Export Type", "Requester", "Status", "Last Change"
        );
        println!("{}", "-".repeat(118));
        for job in &jobs {
            println!(
                "{:<38} {:<28} {:<16} {:<14} {:<20}",
                job.id.to_string(),
                job.identity.export_type.as_str(),
                job.identity.requester_id.as_str(),
                status_label(job.status),
                job.modified_at.format("%Y-%m-%d %H:%M:%S").to_string()
            );
        }

        Ok(0)
    }

    fn matches(&self, job: &ExportJob) -> bool {
        let type_ok = self
            .export_type
            .as_deref()
            .map_or(true, |t| job.identity.export_type.as_str() == t);
        let requester_ok = self
            .requester
            .as_deref()
            .map_or(true, |r| job.identity.requester_id.as_str() == r);
        type_ok && requester_ok
    }

    fn print_job(&self, job: &ExportJob) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(job)?);
            return Ok(());
        }

        println!("Job {}", job.id);
        println!("  Name: {}", job.name);
        println!("  Export Type: {}", job.identity.export_type);
        println!("  Requester: {}", job.identity.requester_id);
        println!("  Audience: {}", job.identity.audience);
        if let Some(org) = &job.identity.organization_id {
            println!("  Organization: {org}");
        }
        println!("  Status: {}", status_label(job.status));
        println!("  Created: {}", job.created_at.format("%Y-%m-%d %H:%M:%S"));
        if let Some(location) = &job.result_location {
            println!("  File: {}", location.path);
            println!("  URL: {}", location.url);
        }
        if let Some(message) = &job.error_message {
            println!("  Error: {message}");
        }
        Ok(())
    }
}

fn status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Queued => "⏸️  Queued",
        JobStatus::Processing => "🔄 Processing",
        JobStatus::Completed => "✅ Completed",
        JobStatus::Failed => "❌ Failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ExportType, RequesterId};
    use crate::domain::job::{Audience, ExportIdentity};

    fn job(export_type: &str, requester: &str) -> ExportJob {
        ExportJob::new(
            ExportIdentity::new(
                ExportType::new(export_type).unwrap(),
                RequesterId::new(requester).unwrap(),
                Audience::NormalUser,
                None,
            ),
            None,
        )
    }

    #[test]
    fn test_filters() {
        let args = StatusArgs {
            job_id: None,
            export_type: Some("Daily".to_string()),
            requester: None,
            json: false,
        };
        assert!(args.matches(&job("Daily", "u1")));
        assert!(!args.matches(&job("Monthly", "u1")));

        let args = StatusArgs {
            export_type: None,
            requester: Some("u2".to_string()),
            ..args
        };
        assert!(args.matches(&job("Monthly", "u2")));
        assert!(!args.matches(&job("Monthly", "u1")));
    }
}
