// File: orchestrator/src/services/escalation.rs
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::constants::defaults::MISSING_CONFIG_REASON;
use crate::notify::{deliver_to_all, Notifier};
use crate::services::ticketing::TicketUpdater;
use crate::workflow::{EscalationResult, FailureRecord};

/// Turns a failure record into stakeholder alerts plus a ticket update.
///
/// Partial delivery is the normal case and still reports `notified`; only a missing
/// channel or an empty recipient list yields `error`, and then nothing is sent.
pub struct FailureEscalationHandler {
    notifier: Option<Arc<dyn Notifier>>,
    tickets: Arc<dyn TicketUpdater>,
}

impl FailureEscalationHandler {
    pub fn new(notifier: Option<Arc<dyn Notifier>>, tickets: Arc<dyn TicketUpdater>) -> Self {
        Self { notifier, tickets }
    }

    #[instrument(skip(self, record), fields(instance_id = %record.instance_id, step = %record.step))]
    pub async fn handle(&self, record: FailureRecord) -> EscalationResult {
        let notifier = match &self.notifier {
            Some(notifier) if !record.notify_recipients.is_empty() => notifier.clone(),
            _ => {
                error!(
                    "Missing notification channel or recipients for {}, escalation skipped",
                    record.hostname
                );
                return EscalationResult::Error {
                    hostname: record.hostname,
                    reason: MISSING_CONFIG_REASON.to_string(),
                };
            }
        };

        let subject = alert_subject(&record);
        let body = alert_body(&record);

        let report = deliver_to_all(
            notifier.as_ref(),
            &record.notify_recipients,
            &subject,
            &body,
        )
        .await;

        if report.failed.is_empty() {
            info!(
                "Escalation for {} delivered to all {} recipients",
                record.hostname,
                report.succeeded.len()
            );
        } else {
            warn!(
                "Escalation for {} delivered to {}/{} recipients",
                record.hostname,
                report.succeeded.len(),
                report.attempted()
            );
        }

        self.tickets.record_failure(&record).await;

        EscalationResult::Notified {
            hostname: record.hostname,
            delivered: report.succeeded,
            undelivered: report.failed,
        }
    }
}

pub fn alert_subject(record: &FailureRecord) -> String {
    format!("[ALERT] {} - {}", record.step.headline(), record.hostname)
}

pub fn alert_body(record: &FailureRecord) -> String {
    format!(
        "Reboot workflow failure ({step})\n\n\
         Hostname     : {hostname}\n\
         Instance ID  : {instance_id}\n\
         Region       : {region}\n\
         Ticket       : {ticket}\n\
         Reason       : {reason}\n\n\
         This failure was detected automatically by the reboot orchestrator.\n\
         Please investigate or escalate immediately.\n",
        step = record.step,
        hostname = record.hostname,
        instance_id = record.instance_id,
        region = record.region,
        ticket = record.ticket_or_placeholder(),
        reason = record.reason,
    )
}
