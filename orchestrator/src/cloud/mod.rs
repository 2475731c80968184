//! Compute and storage control-plane seams
//!
//! Stage services only talk to the cloud through these traits. `HttpControlPlane`
//! is the production adapter; tests substitute in-memory fakes.

pub mod http;

pub use http::HttpControlPlane;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ControlPlaneError;

/// Lifecycle state reported for an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    Pending,
    Running,
    Stopping,
    Stopped,
    ShuttingDown,
    Terminated,
    #[serde(other)]
    Unknown,
}

/// Result of a reachability/status check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Impaired,
    Initializing,
    InsufficientData,
    #[serde(other)]
    Unknown,
}

/// One status probe of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStatus {
    pub state: InstanceState,
    pub system_status: CheckStatus,
    pub instance_status: CheckStatus,
}

impl InstanceStatus {
    /// Running with both system and instance checks passing
    pub fn is_healthy(&self) -> bool {
        self.state == InstanceState::Running
            && self.system_status == CheckStatus::Ok
            && self.instance_status == CheckStatus::Ok
    }
}

#[async_trait]
pub trait ComputeControlPlane: Send + Sync {
    /// Volume ids attached to the instance
    async fn describe_volumes(
        &self,
        region: &str,
        instance_id: &str,
    ) -> Result<Vec<String>, ControlPlaneError>;

    async fn reboot_instance(&self, region: &str, instance_id: &str)
        -> Result<(), ControlPlaneError>;

    async fn instance_status(
        &self,
        region: &str,
        instance_id: &str,
    ) -> Result<InstanceStatus, ControlPlaneError>;
}

#[async_trait]
pub trait StorageControlPlane: Send + Sync {
    /// Request a point-in-time snapshot and return its id
    async fn create_snapshot(
        &self,
        region: &str,
        volume_id: &str,
        description: &str,
    ) -> Result<String, ControlPlaneError>;
}
