// File: orchestrator/src/config/mod.rs
pub mod manager;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::time::Duration;
pub use manager::ConfigManager;

use crate::constants::{defaults, health_check, http};
use crate::errors::ConfigError;
use crate::health::PollPolicy;
use crate::workflow::InstanceTarget;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timezone the naive `scheduled_reboot_time` of each target is expressed in
    #[serde(default = "default_schedule_timezone")]
    pub schedule_timezone: String,
    pub control_plane: ControlPlaneConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub escalation: EscalationConfig,
    #[serde(default)]
    pub health_check: HealthCheckConfig,
    // Populated from config/targets/*.json
    #[serde(skip)]
    pub targets: Vec<InstanceTarget>,
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_schedule_timezone() -> String {
    defaults::SCHEDULE_TIMEZONE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlPlaneConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    http::CONTROL_PLANE_TIMEOUT_SECONDS
}

/// Notification channel. An empty or missing webhook URL means no channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub webhook_url: Option<String>,
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationMode {
    /// Run the escalation handler as a background task of this process
    #[default]
    InProcess,
    /// Hand failure records to a remote handler's event endpoint
    Http,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EscalationConfig {
    #[serde(default)]
    pub mode: EscalationMode,
    pub handler_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckConfig {
    #[serde(default = "default_poll_delay")]
    pub delay_seconds: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_poll_delay() -> u64 {
    health_check::POLL_DELAY.as_secs()
}

fn default_max_attempts() -> u32 {
    health_check::MAX_ATTEMPTS
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            delay_seconds: default_poll_delay(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl HealthCheckConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(Duration::from_secs(self.delay_seconds), self.max_attempts)
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.schedule_timezone
            .parse::<Tz>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "schedule_timezone".to_string(),
                reason: e.to_string(),
            })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.control_plane.base_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "control_plane.base_url".to_string(),
            });
        }

        if self.health_check.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "health_check.max_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        self.timezone()?;

        if self.escalation.mode == EscalationMode::Http
            && self
                .escalation
                .handler_url
                .as_deref()
                .map(|url| url.trim().is_empty())
                .unwrap_or(true)
        {
            return Err(ConfigError::MissingRequired {
                field: "escalation.handler_url".to_string(),
            });
        }

        Ok(())
    }
}
