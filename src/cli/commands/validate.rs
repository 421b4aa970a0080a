//! Validate config command implementation
//!
//! Implements `validate-config`, which loads the configuration file and
//! prints a summary of what the engine would run with.

use crate::config::load_config;
use crate::config::schema::{NotificationBackend, StoreBackend};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Diagnostic Mode: {}", config.application.diagnostic_mode);
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  Public Base URL: {}", config.export.public_base_url);
        println!("  Execution Mode: {:?}", config.export.execution_mode);
        println!("  Single Flight: {}", config.export.single_flight);

        match config.store.backend {
            StoreBackend::Memory => println!("  Job Store: memory"),
            StoreBackend::File => println!(
                "  Job Store: file ({})",
                config.store.path.as_deref().unwrap_or("-")
            ),
        }

        match config.notification.backend {
            NotificationBackend::Log => println!("  Notifications: log"),
            NotificationBackend::Webhook => println!(
                "  Notifications: webhook ({})",
                config.notification.webhook_url.as_deref().unwrap_or("-")
            ),
        }

        println!("  Exports: {}", config.exports.len());
        for definition in &config.exports {
            let merge = definition
                .merge
                .as_ref()
                .map(|m| format!(", merge on '{}'", m.merge_header()))
                .unwrap_or_default();
            println!(
                "    - {} ({} columns{})",
                definition.export_type,
                definition.fields.len(),
                merge
            );
        }
        println!();

        Ok(0)
    }
}
