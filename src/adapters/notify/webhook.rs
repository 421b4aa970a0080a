//! Webhook notifier
//!
//! POSTs each [`Notification`] as JSON to a configured endpoint, with an
//! optional bearer token.

use crate::adapters::notify::traits::{Notification, Notifier};
use crate::config::SecretString;
use crate::domain::errors::SheetforgeError;
use crate::domain::Result;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Delivers notifications to an HTTP endpoint
pub struct WebhookNotifier {
    url: String,
    token: Option<SecretString>,
    client: Client,
}

impl WebhookNotifier {
    /// Create a webhook notifier
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(url: &str, token: Option<SecretString>, timeout_seconds: u64) -> Result<Self> {
        url::Url::parse(url).map_err(|e| {
            SheetforgeError::Configuration(format!("Invalid webhook URL '{url}': {e}"))
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(timeout_seconds.min(10)))
            .build()
            .map_err(|e| {
                SheetforgeError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            url: url.to_string(),
            token,
            client,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        let mut request = self.client.post(&self.url).json(notification);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SheetforgeError::Notification(format!("Webhook request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetforgeError::Notification(format!(
                "Webhook returned status {status}: {body}"
            )));
        }

        tracing::debug!(
            job_id = %notification.action_ref,
            url = %self.url,
            "Notification delivered to webhook"
        );
        Ok(())
    }
}
