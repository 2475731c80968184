//! Health polling policy and outcomes

use serde::Serialize;
use std::time::Duration;

use crate::constants::health_check;

/// Fixed-delay, bounded retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub fn new(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Longest time a poll loop can take, ignoring request latency. Saturates at
    /// `Duration::MAX`.
    pub fn ceiling(&self) -> Duration {
        self.delay.saturating_mul(self.max_attempts)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(health_check::POLL_DELAY, health_check::MAX_ATTEMPTS)
    }
}

/// How a poll loop ended when no probe errored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HealthOutcome {
    Healthy { attempts: u32 },
    TimedOut { attempts: u32 },
}
