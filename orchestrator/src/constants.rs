//! Central repository for timeouts, offsets, limits and default values
//!
//! Constants are grouped by concern so the stage services, the scheduler and the
//! configuration layer all read the same numbers.

use std::time::Duration;

/// Health polling policy shared by the reboot executor and the post-reboot validator
pub mod health_check {
    use super::Duration;

    /// Fixed delay between two status probes
    pub const POLL_DELAY: Duration = Duration::from_secs(15);

    /// Maximum number of status probes before giving up (~5 minutes with the delay above)
    pub const MAX_ATTEMPTS: u32 = 20;
}

/// Trigger offsets relative to the scheduled reboot time
pub mod triggers {
    /// Pre-reboot notice fires this many minutes before the reboot
    pub const NOTIFY_LEAD_MINUTES: i64 = 60;

    /// Post-reboot validation fires this many minutes after the reboot
    pub const VALIDATE_DELAY_MINUTES: i64 = 5;

    /// Format of `scheduled_reboot_time` in target payloads
    pub const SCHEDULE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

    /// Timestamp suffix used in rule names
    pub const RULE_TIME_FORMAT: &str = "%Y%m%d%H%M";
}

/// Tags marking an instance whose lifecycle is managed by something else
pub mod membership {
    /// Instances carrying any of these tags with value `true` are never orchestrated
    pub const EXCLUSION_TAGS: [&str; 2] = ["EKS", "ASG"];
}

/// HTTP client timeouts
pub mod http {
    /// Default timeout for control-plane requests
    pub const CONTROL_PLANE_TIMEOUT_SECONDS: u64 = 30;

    /// Webhook delivery timeout
    pub const WEBHOOK_TIMEOUT_SECONDS: u64 = 10;

    /// Timeout for handing a failure record to a remote escalation handler
    pub const DISPATCH_TIMEOUT_SECONDS: u64 = 10;
}

/// Default configuration values
pub mod defaults {
    /// Region used when a target payload omits one
    pub const REGION: &str = "ap-south-1";

    /// Hostname used when a target payload omits one
    pub const HOSTNAME: &str = "unknown-host";

    /// Placeholder rendered for absent ticket references
    pub const TICKET_PLACEHOLDER: &str = "N/A";

    /// Timezone the naive `scheduled_reboot_time` is interpreted in
    pub const SCHEDULE_TIMEZONE: &str = "UTC";

    pub const HOST: &str = "0.0.0.0";

    pub const PORT: u16 = 8096;

    /// Reason reported when escalation cannot run for lack of a channel or recipients
    pub const MISSING_CONFIG_REASON: &str = "Missing config";
}
