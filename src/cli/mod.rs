//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for sheetforge using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

const DEFAULT_LOG_LEVEL: &str = "info";

/// sheetforge - spreadsheet export job engine
#[derive(Parser, Debug)]
#[command(name = "sheetforge")]
#[command(version, about, long_about = None)]
#[command(author = "Sheetforge Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sheetforge.toml", env = "SHEETFORGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHEETFORGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging section to start with
    ///
    /// `--log-level` wins over `application.log_level`. When the config file
    /// cannot be loaded, console logging at the default level is used and the
    /// command reports the load error itself.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        match load_config(&self.config) {
            Ok(config) => {
                let level = self
                    .log_level
                    .clone()
                    .unwrap_or(config.application.log_level);
                (level, config.logging)
            }
            Err(_) => (
                self.log_level
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
                LoggingConfig::default(),
            ),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate (or reuse) an export for a requester
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show export jobs
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
