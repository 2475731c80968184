//! Instance health probing
//!
//! This module polls an instance's status with a bounded, fixed-delay retry policy.

pub mod prober;
pub mod types;

pub use prober::{timeout_reason, HealthProber};
pub use types::{HealthOutcome, PollPolicy};
