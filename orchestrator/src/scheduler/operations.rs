// File: orchestrator/src/scheduler/operations.rs
use anyhow::{anyhow, Result};
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, instrument, warn};

use super::{plan_triggers, TriggerPlan};
use crate::services::StageServices;
use crate::workflow::InstanceTarget;

/// Registers one one-shot job per planned trigger. Jobs carry their own copy of the
/// target payload and invoke the stage services directly.
pub struct RebootScheduler {
    stages: Arc<StageServices>,
    timezone: Tz,
    scheduler: JobScheduler,
}

impl RebootScheduler {
    pub async fn new(stages: Arc<StageServices>, timezone: Tz) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create JobScheduler: {}", e))?;

        Ok(Self {
            stages,
            timezone,
            scheduler,
        })
    }

    /// Register triggers for every target. Returns the number of jobs added.
    #[instrument(skip(self, targets))]
    pub async fn register_targets(&self, targets: &[InstanceTarget]) -> Result<usize> {
        let mut scheduled_count = 0;

        for target in targets {
            if target.is_externally_managed() {
                info!(
                    "Skipping {} ({}): lifecycle managed by EKS/ASG",
                    target.hostname, target.instance_id
                );
                continue;
            }

            let plans = match plan_triggers(target, self.timezone) {
                Ok(plans) => plans,
                Err(e) => {
                    error!("✗ Cannot schedule {}: {}", target.hostname, e);
                    continue;
                }
            };

            for plan in plans {
                if plan.fire_at <= Utc::now() {
                    warn!(
                        "Trigger {} fires in the past ({}), not registering",
                        plan.rule_name, plan.fire_at
                    );
                    continue;
                }

                match self.register_trigger(&plan, target).await {
                    Ok(()) => {
                        scheduled_count += 1;
                        info!("✓ Registered {} at {}", plan.rule_name, plan.fire_at.to_rfc3339());
                    }
                    Err(e) => {
                        error!("✗ Failed to register {}: {}", plan.rule_name, e);
                    }
                }
            }
        }

        Ok(scheduled_count)
    }

    pub async fn start(&self) -> Result<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| anyhow!("Failed to start scheduler: {}", e))?;
        info!("✓ Reboot scheduler started");
        Ok(())
    }

    /// Add one job that runs `plan.kind` for its own copy of `target` at `plan.fire_at`
    pub async fn register_trigger(&self, plan: &TriggerPlan, target: &InstanceTarget) -> Result<()> {
        let delay = (plan.fire_at - Utc::now())
            .to_std()
            .map_err(|e| anyhow!("Trigger {} is not in the future: {}", plan.rule_name, e))?;

        let stages = self.stages.clone();
        let target = target.clone();
        let kind = plan.kind;
        let rule_name = plan.rule_name.clone();

        let job = Job::new_one_shot_async(delay, move |_uuid, _scheduler| {
            let stages = stages.clone();
            let target = target.clone();
            let rule_name = rule_name.clone();

            Box::pin(async move {
                info!("⏰ Trigger {} fired for {}", rule_name, target.instance_id);
                let result = stages.run(kind, &target).await;
                let rendered = serde_json::to_string(&result).unwrap_or_default();
                if result.is_success() {
                    info!("✓ {} finished: {}", rule_name, rendered);
                } else {
                    error!("✗ {} finished: {}", rule_name, rendered);
                }
            })
        })
        .map_err(|e| anyhow!("Failed to create job for {}: {}", plan.rule_name, e))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("Failed to add job {} to scheduler: {}", plan.rule_name, e))?;

        Ok(())
    }
}
