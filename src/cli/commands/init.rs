//! Init command implementation
//!
//! Implements `init`, which writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "sheetforge.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing sheetforge configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and describe your exports", self.output);
                println!("  2. Set SHEETFORGE_NOTIFICATION_WEBHOOK_TOKEN if using webhooks");
                println!("  3. Validate configuration: sheetforge validate-config");
                println!("  4. Run an export: sheetforge export -t <TYPE> -r <USER> --records data.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# sheetforge configuration

[application]
log_level = "info"
diagnostic_mode = false

[export]
output_dir = "./media"
public_base_url = "/media"
execution_mode = "inline"

[store]
backend = "file"
path = "./sheetforge-jobs"

[notification]
backend = "log"

[logging]
local_enabled = false

[[exports]]
export_type = "DailyAttendanceReport"
title = "Daily Attendance"
fields = [
    { path = "timesheet_for", header = "Date" },
    { path = "timesheet_user.full_name", header = "Full Name" },
    { path = "timesheet_user.employee_code", header = "Employee Code" },
]
sort_by = ["Full Name", "Date"]
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# sheetforge configuration
#
# Every value below can be overridden with a SHEETFORGE_<SECTION>_<KEY>
# environment variable, and ${VAR} references are substituted on load.

# ============================================================================
# Application
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Return the underlying error to the caller instead of a generic message
diagnostic_mode = false

# ============================================================================
# Export generation
# ============================================================================
[export]
# Directory generated workbooks are written to
output_dir = "./media"

# URL prefix the output directory is served under
public_base_url = "/media"

# inline: generate before returning; background: return a queued job
execution_mode = "inline"

# Refuse to start a second job for an identity that is already running
single_flight = false

# ============================================================================
# Job store
# ============================================================================
[store]
# memory | file
backend = "file"
path = "./sheetforge-jobs"

# ============================================================================
# Notifications
# ============================================================================
[notification]
# log | webhook
backend = "log"
# webhook_url = "https://notify.example.com/hooks/exports"
# webhook_token = "${SHEETFORGE_NOTIFICATION_WEBHOOK_TOKEN}"
timeout_seconds = 10

# ============================================================================
# Logging
# ============================================================================
[logging]
# Write JSON logs to a rolling file as well as the console
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"

# ============================================================================
# Export definitions
# ============================================================================
[[exports]]
# Export type, part of the dedup identity
export_type = "DailyAttendanceReport"
title = "Daily Attendance"
filename_stem = "attendance_report"

# Ordered dotted path -> header mapping; headers must be unique
fields = [
    { path = "timesheet_for", header = "Date" },
    { path = "timesheet_user.full_name", header = "Full Name" },
    { path = "timesheet_user.employee_code", header = "Employee Code" },
    { path = "timesheet_user.division.name", header = "Division" },
    { path = "punch_in", header = "Punch In" },
    { path = "punch_out", header = "Punch Out" },
]

# Rows are sorted on these headers before merging
sort_by = ["Full Name", "Date"]

# Lines written above the header row
description = ["Generated by sheetforge"]

# Lines written one blank row below the data
# footer = ["Confidential"]

# Frontend page notifications link to
redirect_url = "https://app.example.com/reports"

# Permissions that receive organization-wide notifications for admin exports
notification_permissions = ["attendance.view_report"]

# Merge consecutive equal values vertically
[exports.merge]
group_by = "Full Name"
# merge = "Employee Code"
# close | drop
trailing = "close"

# Cell comments on header cells
[[exports.header_notes]]
header = "Punch In"
text = "Local time of the first punch"
# author = "HR Team"
"#
        .to_string()
    }
}
