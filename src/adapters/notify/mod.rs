//! Notification channels
//!
//! - [`log::TracingNotifier`] - structured log event only
//! - [`webhook::WebhookNotifier`] - JSON POST to an HTTP endpoint

pub mod log;
pub mod traits;
pub mod webhook;

pub use log::TracingNotifier;
pub use traits::{Notification, NotificationTarget, Notifier};
pub use webhook::WebhookNotifier;
