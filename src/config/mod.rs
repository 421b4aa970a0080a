//! Configuration management for sheetforge.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SHEETFORGE_<SECTION>_<KEY>` overrides
//! - Defaults for every optional setting
//! - Validation on load, including every `[[exports]]` definition
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! diagnostic_mode = false
//!
//! [export]
//! output_dir = "./media"
//! public_base_url = "https://files.example.com/media"
//! execution_mode = "inline"
//!
//! [store]
//! backend = "file"
//! path = "./jobs"
//!
//! [notification]
//! backend = "webhook"
//! webhook_url = "https://hooks.example.com/exports"
//! webhook_token = "${SHEETFORGE_WEBHOOK_TOKEN}"
//!
//! [[exports]]
//! export_type = "DailyAttendanceReport"
//! title = "Daily Attendance"
//! filename_stem = "attendance_report"
//! fields = [
//!     { path = "timesheet_for", header = "Date" },
//!     { path = "timesheet_user.full_name", header = "Full Name" },
//! ]
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetforge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sheetforge.toml")?;
//! println!("Output directory: {}", config.export.output_dir);
//! println!("Exports: {}", config.exports.len());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_str};
pub use schema::{
    ApplicationConfig, ExportConfig, LoggingConfig, NotificationBackend, NotificationConfig,
    SheetforgeConfig, StoreBackend, StoreConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
