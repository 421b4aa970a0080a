//! Configuration schema types

use crate::config::SecretString;
use crate::core::export::{CoordinatorSettings, ExecutionMode, ExportDefinition};
use crate::domain::ids::ExportType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Job store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process map, lost on exit
    #[default]
    Memory,
    /// One JSON file per job in a directory
    File,
}

/// Notification backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationBackend {
    /// Structured log event only
    #[default]
    Log,
    /// JSON POST to `notification.webhook_url`
    Webhook,
}

/// Main sheetforge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetforgeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export generation settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Job store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Notification channel settings
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Configured exports
    #[serde(default)]
    pub exports: Vec<ExportDefinition>,
}

impl SheetforgeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.store.validate()?;
        self.notification.validate()?;
        self.logging.validate()?;

        let mut seen = HashSet::new();
        for definition in &self.exports {
            if !seen.insert(definition.export_type.as_str()) {
                return Err(format!(
                    "Duplicate export definition '{}'",
                    definition.export_type
                ));
            }
            definition.validate().map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    /// Export definition by type
    pub fn find_export(&self, export_type: &ExportType) -> Option<&ExportDefinition> {
        self.exports.iter().find(|d| &d.export_type == export_type)
    }

    /// Coordinator switches derived from the configuration
    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            execution_mode: self.export.execution_mode,
            diagnostic_mode: self.application.diagnostic_mode,
            single_flight: self.export.single_flight,
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Surface generation errors to the caller instead of a generic message
    #[serde(default)]
    pub diagnostic_mode: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            diagnostic_mode: false,
        }
    }
}

/// Export generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory generated files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Base URL generated files are served under
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Inline or background processing
    #[serde(default)]
    pub execution_mode: ExecutionMode,

    /// Collapse concurrent identical requests onto one job
    #[serde(default)]
    pub single_flight: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        if self.public_base_url.trim().is_empty() {
            return Err("export.public_base_url cannot be empty".to_string());
        }
        if self.public_base_url.contains("://") {
            url::Url::parse(&self.public_base_url).map_err(|e| {
                format!(
                    "Invalid export.public_base_url '{}': {e}",
                    self.public_base_url
                )
            })?;
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            public_base_url: default_public_base_url(),
            execution_mode: ExecutionMode::default(),
            single_flight: false,
        }
    }
}

/// Job store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend (memory or file)
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory for the file backend
    #[serde(default)]
    pub path: Option<String>,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == StoreBackend::File
            && self.path.as_deref().map_or(true, |p| p.trim().is_empty())
        {
            return Err("store.path is required when store.backend = 'file'".to_string());
        }
        Ok(())
    }
}

/// Notification channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Backend (log or webhook)
    #[serde(default)]
    pub backend: NotificationBackend,

    /// Endpoint for the webhook backend
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Bearer token sent to the webhook
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub webhook_token: Option<SecretString>,

    /// Webhook request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl NotificationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == NotificationBackend::Webhook {
            let url = self.webhook_url.as_deref().ok_or_else(|| {
                "notification.webhook_url is required when notification.backend = 'webhook'"
                    .to_string()
            })?;
            url::Url::parse(url)
                .map_err(|e| format!("Invalid notification.webhook_url '{url}': {e}"))?;
        }
        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(format!(
                "notification.timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            backend: NotificationBackend::default(),
            webhook_url: None,
            webhook_token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> String {
    "./media".to_string()
}

fn default_public_base_url() -> String {
    "/media".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
