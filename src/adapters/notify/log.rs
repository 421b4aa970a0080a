//! Notifier that only emits a structured log event

use crate::adapters::notify::traits::{Notification, NotificationTarget, Notifier};
use crate::domain::Result;
use async_trait::async_trait;

/// Writes each notification to the `tracing` pipeline
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Create a tracing notifier
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        match &notification.target {
            NotificationTarget::Organization {
                organization_id,
                permissions,
            } => tracing::info!(
                organization_id = %organization_id,
                permissions = ?permissions,
                job_id = %notification.action_ref,
                url = %notification.url,
                "{}",
                notification.text
            ),
            NotificationTarget::User { recipient_id } => tracing::info!(
                recipient_id = %recipient_id,
                job_id = %notification.action_ref,
                url = %notification.url,
                "{}",
                notification.text
            ),
        }
        Ok(())
    }
}
