//! Recording fakes for the notification, dispatch and ticketing seams

use async_trait::async_trait;
use orchestrator::errors::{DispatchError, NotificationError};
use orchestrator::notify::Notifier;
use orchestrator::services::{EscalationDispatcher, TicketUpdater};
use orchestrator::workflow::FailureRecord;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

/// One message as handed to the notifier
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    rejected: HashSet<String>,
    attempts: Mutex<Vec<SentMessage>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliveries to `recipient` fail
    pub fn rejecting(mut self, recipient: &str) -> Self {
        self.rejected.insert(recipient.to_string());
        self
    }

    /// Every publish call, successful or not
    pub fn attempts(&self) -> Vec<SentMessage> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    /// Wait until at least `count` publish calls were seen, for detached handlers
    pub async fn wait_for_attempts(&self, count: usize) -> bool {
        for _ in 0..100 {
            if self.attempt_count() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        self.attempts.lock().unwrap().push(SentMessage {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        if self.rejected.contains(recipient) {
            return Err(NotificationError::DeliveryFailed {
                recipient: recipient.to_string(),
                reason: "mailbox unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingDispatcher {
    unreachable: bool,
    records: Mutex<Vec<FailureRecord>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every dispatch is recorded and then reported as unreachable
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<FailureRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl EscalationDispatcher for RecordingDispatcher {
    async fn dispatch(&self, record: FailureRecord) -> Result<(), DispatchError> {
        self.records.lock().unwrap().push(record);
        if self.unreachable {
            return Err(DispatchError::Unreachable {
                target: "escalation-handler".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingTicketUpdater {
    updates: Mutex<Vec<FailureRecord>>,
}

impl RecordingTicketUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<FailureRecord> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketUpdater for RecordingTicketUpdater {
    async fn record_failure(&self, record: &FailureRecord) {
        self.updates.lock().unwrap().push(record.clone());
    }
}
