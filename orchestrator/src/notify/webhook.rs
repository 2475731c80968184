// File: orchestrator/src/notify/webhook.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use super::Notifier;
use crate::config::NotificationConfig;
use crate::constants::http::WEBHOOK_TIMEOUT_SECONDS;
use crate::errors::NotificationError;

#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload<'a> {
    pub timestamp: DateTime<Utc>,
    pub topic: Option<&'a str>,
    pub recipient: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

/// Posts each message as JSON to a webhook that fans out to mail/chat
pub struct WebhookNotifier {
    webhook_url: String,
    topic: Option<String>,
    client: Client,
}

impl WebhookNotifier {
    /// Returns `None` when no webhook URL is configured
    pub fn from_config(config: &NotificationConfig) -> Result<Option<Self>, NotificationError> {
        let webhook_url = match config.webhook_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => return Ok(None),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| NotificationError::DeliveryFailed {
                recipient: webhook_url.clone(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Some(Self {
            webhook_url,
            topic: config.topic.clone(),
            client,
        }))
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        let payload = NotificationPayload {
            timestamp: Utc::now(),
            topic: self.topic.as_deref(),
            recipient,
            subject,
            message: body,
        };

        match timeout(
            Duration::from_secs(WEBHOOK_TIMEOUT_SECONDS),
            self.client.post(&self.webhook_url).json(&payload).send(),
        )
        .await
        {
            Ok(Ok(response)) => {
                if response.status().is_success() {
                    debug!("Webhook accepted message for {}", recipient);
                    Ok(())
                } else {
                    Err(NotificationError::DeliveryFailed {
                        recipient: recipient.to_string(),
                        reason: format!("webhook returned status {}", response.status()),
                    })
                }
            }
            Ok(Err(e)) => Err(NotificationError::DeliveryFailed {
                recipient: recipient.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(NotificationError::Timeout {
                recipient: recipient.to_string(),
            }),
        }
    }
}
