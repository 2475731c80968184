// File: orchestrator/src/services/dispatch.rs
//
// Fire-and-forget hand-off of failure records to the escalation handler
//
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::constants::http::DISPATCH_TIMEOUT_SECONDS;
use crate::errors::DispatchError;
use crate::services::escalation::FailureEscalationHandler;
use crate::workflow::{EscalationResult, FailureRecord};

/// Hands a failure record to the escalation handler without waiting for it to finish.
///
/// An `Err` only means the hand-off itself failed. Nothing is retried.
#[async_trait]
pub trait EscalationDispatcher: Send + Sync {
    async fn dispatch(&self, record: FailureRecord) -> Result<(), DispatchError>;
}

/// Runs the handler as a detached task on the current runtime
pub struct InProcessDispatcher {
    handler: Arc<FailureEscalationHandler>,
}

impl InProcessDispatcher {
    pub fn new(handler: Arc<FailureEscalationHandler>) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl EscalationDispatcher for InProcessDispatcher {
    async fn dispatch(&self, record: FailureRecord) -> Result<(), DispatchError> {
        let handler = self.handler.clone();
        let hostname = record.hostname.clone();

        tokio::spawn(async move {
            match handler.handle(record).await {
                EscalationResult::Notified { delivered, .. } => {
                    info!(
                        "Escalation for {} finished, {} recipients notified",
                        hostname,
                        delivered.len()
                    );
                }
                EscalationResult::Error { reason, .. } => {
                    error!("Escalation for {} did not run: {}", hostname, reason);
                }
            }
        });

        Ok(())
    }
}

/// Posts the record to a remote handler's event endpoint, which acknowledges
/// before running the handler
pub struct HttpDispatcher {
    handler_url: String,
    client: Client,
}

impl HttpDispatcher {
    pub fn new(handler_url: impl Into<String>) -> Result<Self, DispatchError> {
        let handler_url = handler_url.into();
        let client = Client::builder()
            .timeout(Duration::from_secs(DISPATCH_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| DispatchError::Unreachable {
                target: handler_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            handler_url,
            client,
        })
    }
}

#[async_trait]
impl EscalationDispatcher for HttpDispatcher {
    async fn dispatch(&self, record: FailureRecord) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.handler_url)
            .json(&record)
            .send()
            .await
            .map_err(|e| DispatchError::Unreachable {
                target: self.handler_url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DispatchError::Rejected {
                target: self.handler_url.clone(),
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}
