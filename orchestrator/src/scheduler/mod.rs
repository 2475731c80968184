//! Trigger planning and registration for scheduled reboots
//!
//! Every managed instance gets three independent one-shot triggers derived from its
//! `scheduled_reboot_time`:
//!
//! - **notify**: one hour before the reboot, warns the owners
//! - **reboot**: at the scheduled time, snapshots and reboots
//! - **validate**: five minutes after, checks health and escalates on failure
//!
//! The triggers share nothing but the target payload each one carries.
//! Instances tagged `EKS=true` or `ASG=true` get no triggers at all.
//!
//! # Configuration
//!
//! Targets are listed in `config/targets/*.json`:
//!
//! ```json
//! [{
//!   "instance_id": "i-0abc123",
//!   "hostname": "web-01.prod.internal",
//!   "region": "eu-west-1",
//!   "scheduled_reboot_time": "2026-11-02 03:30",
//!   "tags": {"ASG": "false"},
//!   "ticket_id": "CHG0012345",
//!   "notify_recipients": ["ops@example.com"]
//! }]
//! ```

pub mod operations;
pub use operations::RebootScheduler;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

use crate::constants::triggers;
use crate::workflow::InstanceTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Notify,
    Reboot,
    Validate,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Notify => "notify",
            TriggerKind::Reboot => "reboot",
            TriggerKind::Validate => "validate",
        }
    }

    /// Offset of this trigger from the scheduled reboot time
    pub fn offset(&self) -> Duration {
        match self {
            TriggerKind::Notify => -Duration::minutes(triggers::NOTIFY_LEAD_MINUTES),
            TriggerKind::Reboot => Duration::zero(),
            TriggerKind::Validate => Duration::minutes(triggers::VALIDATE_DELAY_MINUTES),
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trigger to register for one target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerPlan {
    pub kind: TriggerKind,
    pub instance_id: String,
    pub rule_name: String,
    pub fire_at: DateTime<Utc>,
    /// Year-qualified cron expression for event buses that want one
    pub cron_expression: String,
}

/// Compute the notify/reboot/validate triggers for a target.
///
/// Returns an empty list for externally managed instances.
pub fn plan_triggers(target: &InstanceTarget, timezone: Tz) -> Result<Vec<TriggerPlan>> {
    if target.is_externally_managed() {
        return Ok(Vec::new());
    }

    let reboot_at = reboot_time_utc(target, timezone)?;

    Ok([TriggerKind::Notify, TriggerKind::Reboot, TriggerKind::Validate]
        .into_iter()
        .map(|kind| {
            let fire_at = reboot_at + kind.offset();
            TriggerPlan {
                kind,
                instance_id: target.instance_id.clone(),
                rule_name: format!(
                    "{}-{}-{}",
                    kind,
                    target.short_hostname(),
                    fire_at.format(triggers::RULE_TIME_FORMAT)
                ),
                fire_at,
                cron_expression: cron_expression(&fire_at),
            }
        })
        .collect())
}

/// Interpret the target's naive reboot time in `timezone` and convert to UTC
pub fn reboot_time_utc(target: &InstanceTarget, timezone: Tz) -> Result<DateTime<Utc>> {
    let naive = target.scheduled_reboot_time.ok_or_else(|| {
        anyhow!(
            "Target {} has no scheduled_reboot_time",
            target.instance_id
        )
    })?;

    // Ambiguous local times (DST fall-back) resolve to the earlier instant
    let local = timezone.from_local_datetime(&naive).earliest().ok_or_else(|| {
        anyhow!(
            "Scheduled time {} does not exist in timezone {} for {}",
            naive,
            timezone,
            target.instance_id
        )
    })?;

    Ok(local.with_timezone(&Utc))
}

fn cron_expression(at: &DateTime<Utc>) -> String {
    at.format("cron(%-M %-H %-d %-m ? %Y)").to_string()
}
