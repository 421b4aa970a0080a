//! Adapter factory
//!
//! Builds the job store, sheet writer and notifier selected by the
//! configuration, and wires them into an [`ExportCoordinator`].

use crate::adapters::notify::{Notifier, TracingNotifier, WebhookNotifier};
use crate::adapters::store::{FileJobStore, JobStore, MemoryJobStore};
use crate::adapters::writer::{SheetWriter, XlsxSheetWriter};
use crate::config::schema::{NotificationBackend, SheetforgeConfig, StoreBackend};
use crate::core::export::ExportCoordinator;
use crate::domain::errors::SheetforgeError;
use crate::domain::Result;
use std::sync::Arc;

/// Create the job store selected by `store.backend`
///
/// # Errors
///
/// Returns an error if the file store directory cannot be created or is not
/// configured.
pub async fn create_job_store(config: &SheetforgeConfig) -> Result<Arc<dyn JobStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::info!("Creating in-memory job store");
            Ok(Arc::new(MemoryJobStore::new()))
        }
        StoreBackend::File => {
            let path = config.store.path.as_deref().ok_or_else(|| {
                SheetforgeError::Configuration(
                    "store.path is required when store.backend = 'file'".to_string(),
                )
            })?;

            tracing::info!(path = %path, "Creating file job store");
            Ok(Arc::new(FileJobStore::open(path).await?))
        }
    }
}

/// Create the XLSX writer for `export.output_dir`
pub fn create_sheet_writer(config: &SheetforgeConfig) -> Arc<dyn SheetWriter> {
    Arc::new(XlsxSheetWriter::new(
        &config.export.output_dir,
        &config.export.public_base_url,
    ))
}

/// Create the notifier selected by `notification.backend`
///
/// # Errors
///
/// Returns an error if the webhook backend is selected without a valid URL.
pub fn create_notifier(config: &SheetforgeConfig) -> Result<Arc<dyn Notifier>> {
    let notification = &config.notification;
    match notification.backend {
        NotificationBackend::Log => Ok(Arc::new(TracingNotifier::new())),
        NotificationBackend::Webhook => {
            let url = notification.webhook_url.as_deref().ok_or_else(|| {
                SheetforgeError::Configuration(
                    "notification.webhook_url is required when notification.backend = 'webhook'"
                        .to_string(),
                )
            })?;

            tracing::info!(url = %url, "Creating webhook notifier");
            Ok(Arc::new(WebhookNotifier::new(
                url,
                notification.webhook_token.clone(),
                notification.timeout_seconds,
            )?))
        }
    }
}

/// Build a coordinator from configuration
///
/// # Errors
///
/// Returns an error if any adapter cannot be created.
pub async fn create_coordinator(config: &SheetforgeConfig) -> Result<ExportCoordinator> {
    let store = create_job_store(config).await?;
    let writer = create_sheet_writer(config);
    let notifier = create_notifier(config)?;

    Ok(ExportCoordinator::new(
        store,
        writer,
        notifier,
        config.coordinator_settings(),
    ))
}
