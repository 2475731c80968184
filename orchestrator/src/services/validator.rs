// File: orchestrator/src/services/validator.rs
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::cloud::ComputeControlPlane;
use crate::health::{timeout_reason, HealthOutcome, HealthProber, PollPolicy};
use crate::services::dispatch::EscalationDispatcher;
use crate::workflow::{FailureRecord, FailureStep, InstanceTarget, StagePayload, WorkflowResult};

/// Validation stage, fired a fixed offset after the reboot regardless of how the
/// reboot stage's own wait went. A timeout or probe error here is a failure and is
/// escalated exactly once.
pub struct PostRebootValidator {
    prober: HealthProber,
    policy: PollPolicy,
    dispatcher: Arc<dyn EscalationDispatcher>,
}

impl PostRebootValidator {
    pub fn new(
        compute: Arc<dyn ComputeControlPlane>,
        policy: PollPolicy,
        dispatcher: Arc<dyn EscalationDispatcher>,
    ) -> Self {
        Self {
            prober: HealthProber::new(compute),
            policy,
            dispatcher,
        }
    }

    #[instrument(
        skip(self, target),
        fields(instance_id = %target.instance_id, hostname = %target.hostname, run_id = %Uuid::new_v4())
    )]
    pub async fn validate(&self, target: &InstanceTarget) -> WorkflowResult {
        info!(
            "Validating reboot of {} ({}) in {}",
            target.instance_id, target.hostname, target.region
        );

        let reason = match self
            .prober
            .poll_health(&target.region, &target.instance_id, self.policy)
            .await
        {
            Ok(HealthOutcome::Healthy { attempts }) => {
                info!("Instance passed status checks");
                return WorkflowResult::success(target, StagePayload::Validation { attempts });
            }
            Ok(HealthOutcome::TimedOut { .. }) => timeout_reason(&target.instance_id, &self.policy),
            Err(e) => e.to_string(),
        };

        warn!("Validation failed for {}: {}", target.instance_id, reason);

        let record = FailureRecord::from_target(target, FailureStep::Validate, reason.clone());
        match self.dispatcher.dispatch(record).await {
            Ok(()) => info!("Triggered failure handler for {}", target.instance_id),
            Err(e) => error!("Could not trigger failure handler: {}", e),
        }

        WorkflowResult::failed(target, reason)
    }
}
