//! Common test data and constants

use chrono::{Duration, NaiveDateTime, Utc};
use orchestrator::health::PollPolicy;
use orchestrator::workflow::{FailureRecord, FailureStep, InstanceTarget};
use std::time::Duration as StdDuration;

pub mod instances {
    pub const WEB_01: &str = "i-0a1b2c3d4e5f60001";
    pub const DB_01: &str = "i-0a1b2c3d4e5f60002";
    pub const WORKER_01: &str = "i-0a1b2c3d4e5f60003";
}

pub mod recipients {
    pub const OPS: &str = "ops@example.com";
    pub const DBA: &str = "dba@example.com";
    pub const ONCALL: &str = "oncall@example.com";
}

pub const REGION: &str = "eu-west-1";

/// Policy that polls without real waiting
pub fn fast_policy(max_attempts: u32) -> PollPolicy {
    PollPolicy::new(StdDuration::from_millis(1), max_attempts)
}

/// Fully populated target for web-01
pub fn web_target() -> InstanceTarget {
    let mut target = InstanceTarget::new(instances::WEB_01, "web-01.prod.internal");
    target.region = REGION.to_string();
    target.ticket_id = Some("CHG0012345".to_string());
    target.notify_recipients = vec![recipients::OPS.to_string()];
    target
}

pub fn target_with_recipients(recipients: &[&str]) -> InstanceTarget {
    let mut target = web_target();
    target.notify_recipients = recipients.iter().map(|r| r.to_string()).collect();
    target
}

pub fn failure_record(recipients: &[&str]) -> FailureRecord {
    FailureRecord::from_target(
        &target_with_recipients(recipients),
        FailureStep::Validate,
        "Instance did not pass health checks",
    )
}

/// A naive local time `days` from now, truncated to the minute
pub fn days_from_now(days: i64) -> NaiveDateTime {
    let at = (Utc::now() + Duration::days(days)).naive_utc();
    NaiveDateTime::parse_from_str(&at.format("%Y-%m-%d %H:%M").to_string(), "%Y-%m-%d %H:%M")
        .expect("valid minute-precision time")
}
