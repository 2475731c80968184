// File: orchestrator/src/services/notice_service.rs
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::constants::{defaults::MISSING_CONFIG_REASON, triggers::SCHEDULE_TIME_FORMAT};
use crate::notify::{deliver_to_all, Notifier};
use crate::workflow::{InstanceTarget, StagePayload, WorkflowResult, WorkflowStep};

/// Pre-reboot notice stage, fired ahead of the reboot to warn the instance's owners
pub struct NoticeService {
    notifier: Option<Arc<dyn Notifier>>,
    timezone_label: String,
}

impl NoticeService {
    pub fn new(notifier: Option<Arc<dyn Notifier>>, timezone_label: impl Into<String>) -> Self {
        Self {
            notifier,
            timezone_label: timezone_label.into(),
        }
    }

    #[instrument(skip(self, target), fields(instance_id = %target.instance_id, hostname = %target.hostname))]
    pub async fn send_notice(&self, target: &InstanceTarget) -> WorkflowResult {
        let Some(notifier) = self.notifier.as_ref() else {
            error!("No notification channel configured, reboot notice for {} not sent", target.hostname);
            return WorkflowResult::error(target, WorkflowStep::Notify, MISSING_CONFIG_REASON);
        };

        if target.notify_recipients.is_empty() {
            info!("No recipients for {}, nothing to notify", target.hostname);
        } else {
            info!(
                "Sending reboot notice for {} to: {:?}",
                target.hostname, target.notify_recipients
            );
        }

        let subject = self.notice_subject(target);
        let body = self.notice_body(target);
        let report = deliver_to_all(
            notifier.as_ref(),
            &target.notify_recipients,
            &subject,
            &body,
        )
        .await;

        if !report.failed.is_empty() {
            warn!(
                "Reboot notice for {} reached {}/{} recipients",
                target.hostname,
                report.succeeded.len(),
                report.attempted()
            );
        }

        WorkflowResult::success(
            target,
            StagePayload::Notice {
                delivered: report.succeeded,
                undelivered: report.failed,
            },
        )
    }

    fn scheduled_time(&self, target: &InstanceTarget) -> String {
        match target.scheduled_reboot_time {
            Some(time) => format!(
                "{} {}",
                time.format(SCHEDULE_TIME_FORMAT),
                self.timezone_label
            ),
            None => "an unscheduled time".to_string(),
        }
    }

    pub fn notice_subject(&self, target: &InstanceTarget) -> String {
        format!(
            "[Reboot Notice] {} scheduled reboot at {}",
            target.hostname,
            self.scheduled_time(target)
        )
    }

    pub fn notice_body(&self, target: &InstanceTarget) -> String {
        format!(
            "This is an automated notification.\n\n\
             The following server is scheduled for a reboot:\n\
             - Hostname: {}\n\
             - Scheduled Time: {}\n\
             - Ticket: {}\n\n\
             If this is unexpected, please contact the support team.\n",
            target.hostname,
            self.scheduled_time(target),
            target.ticket_or_placeholder()
        )
    }
}
