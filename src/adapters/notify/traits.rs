//! Notification channel abstraction

use crate::domain::ids::{JobId, OrganizationId, RequesterId};
use crate::domain::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Who receives a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationTarget {
    /// Everyone in an organization holding one of the permissions
    Organization {
        /// Organization to broadcast to
        organization_id: OrganizationId,
        /// Permission filter; empty means no filter
        permissions: Vec<String>,
    },
    /// A single user
    User {
        /// Recipient
        recipient_id: RequesterId,
    },
}

/// Ephemeral message about a job's terminal transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Recipient(s)
    pub target: NotificationTarget,
    /// Human-readable text
    pub text: String,
    /// Job the message refers to
    pub action_ref: JobId,
    /// Link for the frontend, may be empty
    pub url: String,
}

/// Delivers notifications
///
/// Callers treat delivery as fire-and-forget: an error is logged, never
/// propagated into job state.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification
    async fn notify(&self, notification: &Notification) -> Result<()>;
}
