// File: orchestrator/src/health/prober.rs
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info};

use super::{HealthOutcome, PollPolicy};
use crate::cloud::ComputeControlPlane;
use crate::errors::ControlPlaneError;

/// Polls an instance until it reports healthy or the policy's attempts run out.
///
/// A probe error ends the loop immediately and is returned to the caller, so the
/// three outcomes (healthy, timed out, probe error) stay distinguishable.
#[derive(Clone)]
pub struct HealthProber {
    compute: Arc<dyn ComputeControlPlane>,
}

impl HealthProber {
    pub fn new(compute: Arc<dyn ComputeControlPlane>) -> Self {
        Self { compute }
    }

    pub async fn poll_health(
        &self,
        region: &str,
        instance_id: &str,
        policy: PollPolicy,
    ) -> Result<HealthOutcome, ControlPlaneError> {
        for attempt in 1..=policy.max_attempts {
            let status = self.compute.instance_status(region, instance_id).await?;

            if status.is_healthy() {
                info!(
                    "Instance {} passed status checks on attempt {}/{}",
                    instance_id, attempt, policy.max_attempts
                );
                return Ok(HealthOutcome::Healthy { attempts: attempt });
            }

            debug!(
                "Instance {} not healthy yet (attempt {}/{}): {:?}",
                instance_id, attempt, policy.max_attempts, status
            );

            if attempt < policy.max_attempts {
                sleep(policy.delay).await;
            }
        }

        Ok(HealthOutcome::TimedOut {
            attempts: policy.max_attempts,
        })
    }
}

/// Human-readable cause for an instance that never became healthy
pub fn timeout_reason(instance_id: &str, policy: &PollPolicy) -> String {
    format!(
        "Instance {} did not pass status checks after {} attempts ({}s apart)",
        instance_id,
        policy.max_attempts,
        policy.delay.as_secs()
    )
}
