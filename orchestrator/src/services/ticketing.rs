// File: orchestrator/src/services/ticketing.rs
use async_trait::async_trait;
use tracing::info;

use crate::workflow::FailureRecord;

/// External ticketing hook invoked after escalation notifications went out
#[async_trait]
pub trait TicketUpdater: Send + Sync {
    async fn record_failure(&self, record: &FailureRecord);
}

/// Placeholder ticketing integration: logs the update it would make
#[derive(Debug, Clone, Default)]
pub struct LoggingTicketUpdater;

#[async_trait]
impl TicketUpdater for LoggingTicketUpdater {
    async fn record_failure(&self, record: &FailureRecord) {
        info!(
            "Simulated ticket update for {} - {} ({}): {}",
            record.ticket_or_placeholder(),
            record.step.headline(),
            record.hostname,
            record.reason
        );
    }
}
