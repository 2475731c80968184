//! Notification channel
//!
//! A `Notifier` delivers one subject/body pair to one recipient. `deliver_to_all`
//! fans a message out to many recipients; each delivery is isolated, so one bad
//! address never stops the others.

pub mod webhook;

pub use webhook::WebhookNotifier;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::NotificationError;
use crate::workflow::{collect_concurrent, PartialResults};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError>;
}

/// A recipient the message could not be delivered to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryFailure {
    pub recipient: String,
    pub error: String,
}

/// Delivered recipients and per-recipient failures
pub type DeliveryReport = PartialResults<String, DeliveryFailure>;

/// Send the same message to every recipient concurrently
pub async fn deliver_to_all(
    notifier: &dyn Notifier,
    recipients: &[String],
    subject: &str,
    body: &str,
) -> DeliveryReport {
    collect_concurrent(recipients, |recipient| async move {
        match notifier.publish(recipient, subject, body).await {
            Ok(()) => {
                info!("Notification delivered to {}", recipient);
                Ok(recipient.clone())
            }
            Err(e) => {
                warn!("Failed to notify {}: {}", recipient, e);
                Err(DeliveryFailure {
                    recipient: recipient.clone(),
                    error: e.to_string(),
                })
            }
        }
    })
    .await
}
