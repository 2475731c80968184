// File: orchestrator/src/services/reboot_executor.rs
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::cloud::ComputeControlPlane;
use crate::health::{timeout_reason, HealthOutcome, HealthProber, PollPolicy};
use crate::snapshot::SnapshotManager;
use crate::workflow::{HealthWait, InstanceTarget, StagePayload, WorkflowResult, WorkflowStep};

/// Reboot stage: discover volumes, snapshot them, reboot, wait for health.
///
/// Only discovery and the reboot signal are fatal. The health wait here is
/// informational; a timeout still reports success and detection is left to the
/// post-reboot validator, which runs later on its own trigger.
pub struct RebootExecutor {
    compute: Arc<dyn ComputeControlPlane>,
    snapshot_manager: Arc<SnapshotManager>,
    prober: HealthProber,
    policy: PollPolicy,
}

impl RebootExecutor {
    pub fn new(
        compute: Arc<dyn ComputeControlPlane>,
        snapshot_manager: Arc<SnapshotManager>,
        policy: PollPolicy,
    ) -> Self {
        let prober = HealthProber::new(compute.clone());
        Self {
            compute,
            snapshot_manager,
            prober,
            policy,
        }
    }

    #[instrument(
        skip(self, target),
        fields(instance_id = %target.instance_id, hostname = %target.hostname, run_id = %Uuid::new_v4())
    )]
    pub async fn execute(&self, target: &InstanceTarget) -> WorkflowResult {
        info!(
            "Starting reboot for {} ({}) in region {}",
            target.instance_id, target.hostname, target.region
        );

        // Step 1: volume discovery
        let volume_ids = match self
            .compute
            .describe_volumes(&target.region, &target.instance_id)
            .await
        {
            Ok(volume_ids) => {
                info!("Found volumes: {:?}", volume_ids);
                volume_ids
            }
            Err(e) => {
                error!("Failed to get volumes: {}", e);
                return WorkflowResult::error(target, WorkflowStep::DescribeVolumes, e.to_string());
            }
        };

        // Step 2: best-effort snapshots
        let snapshots = self
            .snapshot_manager
            .snapshot_all(&target.region, &volume_ids, &target.hostname)
            .await;
        info!(
            "Snapshots created: {}/{}",
            snapshots.succeeded.len(),
            volume_ids.len()
        );

        // Step 3: reboot signal
        if let Err(e) = self
            .compute
            .reboot_instance(&target.region, &target.instance_id)
            .await
        {
            error!("Reboot failed: {}", e);
            return WorkflowResult::error(target, WorkflowStep::Reboot, e.to_string());
        }
        info!("Reboot command sent to {}", target.instance_id);

        // Step 4: bounded health wait, never fatal here
        let health_wait = match self
            .prober
            .poll_health(&target.region, &target.instance_id, self.policy)
            .await
        {
            Ok(HealthOutcome::Healthy { attempts }) => {
                info!("Instance is running and passed status checks");
                HealthWait::Healthy { attempts }
            }
            Ok(HealthOutcome::TimedOut { attempts }) => {
                warn!(
                    "Post-reboot check failed: {}",
                    timeout_reason(&target.instance_id, &self.policy)
                );
                HealthWait::TimedOut { attempts }
            }
            Err(e) => {
                warn!("Post-reboot check failed: {}", e);
                HealthWait::ProbeError {
                    error: e.to_string(),
                }
            }
        };

        WorkflowResult::success(
            target,
            StagePayload::Reboot {
                snapshots: snapshots.succeeded,
                snapshot_failures: snapshots.failed,
                health_wait,
            },
        )
    }
}
