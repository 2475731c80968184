// File: orchestrator/src/services/stages.rs
use std::sync::Arc;
use tracing::{info, warn};

use crate::cloud::{ComputeControlPlane, HttpControlPlane, StorageControlPlane};
use crate::config::{Config, EscalationMode};
use crate::errors::{ConfigError, OrchestratorError};
use crate::health::PollPolicy;
use crate::notify::{Notifier, WebhookNotifier};
use crate::scheduler::TriggerKind;
use crate::services::{
    EscalationDispatcher, FailureEscalationHandler, HttpDispatcher, InProcessDispatcher,
    LoggingTicketUpdater, NoticeService, PostRebootValidator, RebootExecutor, TicketUpdater,
};
use crate::snapshot::SnapshotManager;
use crate::workflow::{InstanceTarget, WorkflowResult};

/// External collaborators the stages are built from
#[derive(Clone)]
pub struct Collaborators {
    pub compute: Arc<dyn ComputeControlPlane>,
    pub storage: Arc<dyn StorageControlPlane>,
    pub notifier: Option<Arc<dyn Notifier>>,
    pub tickets: Arc<dyn TicketUpdater>,
}

/// The four stage services, each constructed with explicit configuration
pub struct StageServices {
    pub notice: Arc<NoticeService>,
    pub reboot: Arc<RebootExecutor>,
    pub validator: Arc<PostRebootValidator>,
    pub escalation: Arc<FailureEscalationHandler>,
}

impl StageServices {
    /// Wire the stages; `dispatcher` decides how the validator reaches the
    /// escalation handler. `None` selects in-process dispatch.
    pub fn new(
        collaborators: Collaborators,
        policy: PollPolicy,
        timezone_label: &str,
        dispatcher: Option<Arc<dyn EscalationDispatcher>>,
    ) -> Self {
        let escalation = Arc::new(FailureEscalationHandler::new(
            collaborators.notifier.clone(),
            collaborators.tickets.clone(),
        ));

        let dispatcher = dispatcher
            .unwrap_or_else(|| Arc::new(InProcessDispatcher::new(escalation.clone())));

        let snapshot_manager = Arc::new(SnapshotManager::new(collaborators.storage.clone()));

        Self {
            notice: Arc::new(NoticeService::new(
                collaborators.notifier.clone(),
                timezone_label,
            )),
            reboot: Arc::new(RebootExecutor::new(
                collaborators.compute.clone(),
                snapshot_manager,
                policy,
            )),
            validator: Arc::new(PostRebootValidator::new(
                collaborators.compute,
                policy,
                dispatcher,
            )),
            escalation,
        }
    }

    /// Build production collaborators (REST control plane, webhook notifier,
    /// logging ticket stub) from configuration
    pub fn from_config(config: &Config) -> Result<Self, OrchestratorError> {
        let control_plane = Arc::new(HttpControlPlane::new(&config.control_plane)?);

        let notifier: Option<Arc<dyn Notifier>> =
            match WebhookNotifier::from_config(&config.notification)? {
                Some(webhook) => {
                    info!("Notification channel enabled: {}", webhook.webhook_url());
                    Some(Arc::new(webhook))
                }
                None => {
                    warn!("⚠️  No notification webhook configured, notices and escalations will report 'Missing config'");
                    None
                }
            };

        let dispatcher: Option<Arc<dyn EscalationDispatcher>> = match config.escalation.mode {
            EscalationMode::InProcess => None,
            EscalationMode::Http => {
                let url = config.escalation.handler_url.clone().ok_or_else(|| {
                    ConfigError::MissingRequired {
                        field: "escalation.handler_url".to_string(),
                    }
                })?;
                info!("Escalations will be dispatched to {}", url);
                Some(Arc::new(HttpDispatcher::new(url)?))
            }
        };

        let collaborators = Collaborators {
            compute: control_plane.clone(),
            storage: control_plane,
            notifier,
            tickets: Arc::new(LoggingTicketUpdater),
        };

        Ok(Self::new(
            collaborators,
            config.health_check.poll_policy(),
            &config.schedule_timezone,
            dispatcher,
        ))
    }

    /// Invoke the stage a trigger of `kind` stands for
    pub async fn run(&self, kind: TriggerKind, target: &InstanceTarget) -> WorkflowResult {
        match kind {
            TriggerKind::Notify => self.notice.send_notice(target).await,
            TriggerKind::Reboot => self.reboot.execute(target).await,
            TriggerKind::Validate => self.validator.validate(target).await,
        }
    }
}
