//! Payloads and results exchanged between the scheduler and the stage services

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::constants::{defaults, membership};
use crate::notify::DeliveryFailure;

/// Identity and scheduling payload for one managed instance.
///
/// The same value is attached to every trigger of a workflow and is never
/// modified by the stages that receive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTarget {
    #[serde(deserialize_with = "non_empty_instance_id")]
    pub instance_id: String,
    #[serde(default = "default_hostname")]
    pub hostname: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(
        default,
        with = "schedule_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_reboot_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default, alias = "snow_ticket", skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    #[serde(default, alias = "notify_emails")]
    pub notify_recipients: Vec<String>,
}

fn non_empty_instance_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        return Err(serde::de::Error::custom("instance_id must not be empty"));
    }
    Ok(value)
}

fn default_hostname() -> String {
    defaults::HOSTNAME.to_string()
}

fn default_region() -> String {
    defaults::REGION.to_string()
}

impl InstanceTarget {
    pub fn new(instance_id: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            hostname: hostname.into(),
            region: default_region(),
            scheduled_reboot_time: None,
            tags: HashMap::new(),
            ticket_id: None,
            notify_recipients: Vec::new(),
        }
    }

    /// True when a membership tag says another system owns this instance's lifecycle
    pub fn is_externally_managed(&self) -> bool {
        membership::EXCLUSION_TAGS.iter().any(|tag| {
            self.tags
                .get(*tag)
                .map(|value| value.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        })
    }

    /// First label of the hostname, used in rule names
    pub fn short_hostname(&self) -> &str {
        self.hostname.split('.').next().unwrap_or(&self.hostname)
    }

    pub fn ticket_or_placeholder(&self) -> &str {
        self.ticket_id
            .as_deref()
            .unwrap_or(defaults::TICKET_PLACEHOLDER)
    }
}

/// `scheduled_reboot_time` travels as `YYYY-MM-DD HH:MM`
mod schedule_time {
    use crate::constants::triggers::SCHEDULE_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format(SCHEDULE_TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|value| {
            let value = value.trim();
            NaiveDateTime::parse_from_str(value, SCHEDULE_TIME_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(value, SECONDS_FORMAT))
                .map_err(|e| {
                    serde::de::Error::custom(format!(
                        "invalid scheduled_reboot_time '{}': {}",
                        value, e
                    ))
                })
        })
        .transpose()
    }
}

/// Step of a workflow that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    DescribeVolumes,
    Reboot,
    Validate,
    Notify,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::DescribeVolumes => "describe_volumes",
            WorkflowStep::Reboot => "reboot",
            WorkflowStep::Validate => "validate",
            WorkflowStep::Notify => "notify",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step named by a failure record. Notices are never escalated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStep {
    DescribeVolumes,
    Reboot,
    Validate,
}

impl FailureStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStep::DescribeVolumes => "describe_volumes",
            FailureStep::Reboot => "reboot",
            FailureStep::Validate => "validate",
        }
    }

    /// Alert headline for a failure at this step
    pub fn headline(&self) -> &'static str {
        match self {
            FailureStep::DescribeVolumes => "Volume discovery failed before reboot",
            FailureStep::Reboot => "Reboot signal failed",
            FailureStep::Validate => "Validation failed after reboot",
        }
    }
}

impl fmt::Display for FailureStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub volume_id: String,
    pub snapshot_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFailure {
    pub volume_id: String,
    pub error: String,
}

/// How the reboot executor's own health wait ended. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum HealthWait {
    Healthy { attempts: u32 },
    TimedOut { attempts: u32 },
    ProbeError { error: String },
}

/// Stage-specific part of a successful result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StagePayload {
    Reboot {
        snapshots: Vec<SnapshotRecord>,
        snapshot_failures: Vec<SnapshotFailure>,
        health_wait: HealthWait,
    },
    Notice {
        delivered: Vec<String>,
        undelivered: Vec<DeliveryFailure>,
    },
    Validation {
        attempts: u32,
    },
}

/// Outcome of one stage invocation, returned to whoever fired the trigger
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowResult {
    Success {
        instance_id: String,
        hostname: String,
        #[serde(flatten)]
        payload: StagePayload,
    },
    Error {
        instance_id: String,
        hostname: String,
        step: WorkflowStep,
        error: String,
    },
    Failed {
        instance_id: String,
        hostname: String,
        error: String,
    },
}

impl WorkflowResult {
    pub fn success(target: &InstanceTarget, payload: StagePayload) -> Self {
        WorkflowResult::Success {
            instance_id: target.instance_id.clone(),
            hostname: target.hostname.clone(),
            payload,
        }
    }

    pub fn error(target: &InstanceTarget, step: WorkflowStep, error: impl Into<String>) -> Self {
        WorkflowResult::Error {
            instance_id: target.instance_id.clone(),
            hostname: target.hostname.clone(),
            step,
            error: error.into(),
        }
    }

    pub fn failed(target: &InstanceTarget, error: impl Into<String>) -> Self {
        WorkflowResult::Failed {
            instance_id: target.instance_id.clone(),
            hostname: target.hostname.clone(),
            error: error.into(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            WorkflowResult::Success { .. } => "success",
            WorkflowResult::Error { .. } => "error",
            WorkflowResult::Failed { .. } => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WorkflowResult::Success { .. })
    }

    /// Snapshots taken by a reboot run; empty for every other result
    pub fn snapshots(&self) -> &[SnapshotRecord] {
        match self {
            WorkflowResult::Success {
                payload: StagePayload::Reboot { snapshots, .. },
                ..
            } => snapshots,
            _ => &[],
        }
    }
}

/// A failed workflow run, handed once to the escalation handler and then dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    #[serde(deserialize_with = "non_empty_instance_id")]
    pub instance_id: String,
    #[serde(default = "default_hostname")]
    pub hostname: String,
    #[serde(default = "default_region")]
    pub region: String,
    pub reason: String,
    pub step: FailureStep,
    #[serde(default, alias = "snow_ticket")]
    pub ticket_id: Option<String>,
    #[serde(default, alias = "notify_emails")]
    pub notify_recipients: Vec<String>,
}

impl FailureRecord {
    pub fn from_target(target: &InstanceTarget, step: FailureStep, reason: impl Into<String>) -> Self {
        Self {
            instance_id: target.instance_id.clone(),
            hostname: target.hostname.clone(),
            region: target.region.clone(),
            reason: reason.into(),
            step,
            ticket_id: target.ticket_id.clone(),
            notify_recipients: target.notify_recipients.clone(),
        }
    }

    pub fn ticket_or_placeholder(&self) -> &str {
        self.ticket_id
            .as_deref()
            .unwrap_or(defaults::TICKET_PLACEHOLDER)
    }
}

/// Result of the failure escalation handler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EscalationResult {
    Notified {
        hostname: String,
        delivered: Vec<String>,
        undelivered: Vec<DeliveryFailure>,
    },
    Error {
        hostname: String,
        reason: String,
    },
}

impl EscalationResult {
    pub fn status(&self) -> &'static str {
        match self {
            EscalationResult::Notified { .. } => "notified",
            EscalationResult::Error { .. } => "error",
        }
    }
}
