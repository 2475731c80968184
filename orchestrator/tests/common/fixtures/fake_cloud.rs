//! In-memory control plane for stage tests
//!
//! Behaviour is configured up front with the builder methods; every call is
//! recorded so tests can assert on side effects (or their absence).

use async_trait::async_trait;
use orchestrator::cloud::{
    CheckStatus, ComputeControlPlane, InstanceState, InstanceStatus, StorageControlPlane,
};
use orchestrator::errors::ControlPlaneError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// A snapshot request as the control plane received it
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotCall {
    pub region: String,
    pub volume_id: String,
    pub description: String,
}

pub struct FakeControlPlane {
    volumes: Result<Vec<String>, String>,
    failing_volumes: HashSet<String>,
    reboot_error: Option<String>,
    healthy_after: Option<u32>,
    status_error: Option<String>,

    describe_calls: AtomicU32,
    status_calls: AtomicU32,
    reboot_calls: Mutex<Vec<(String, String)>>,
    snapshot_calls: Mutex<Vec<SnapshotCall>>,
}

impl FakeControlPlane {
    /// Instance with the given volumes that is healthy on the first probe
    pub fn with_volumes(volumes: &[&str]) -> Self {
        Self {
            volumes: Ok(volumes.iter().map(|v| v.to_string()).collect()),
            failing_volumes: HashSet::new(),
            reboot_error: None,
            healthy_after: Some(1),
            status_error: None,
            describe_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
            reboot_calls: Mutex::new(Vec::new()),
            snapshot_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn describe_fails(mut self, reason: &str) -> Self {
        self.volumes = Err(reason.to_string());
        self
    }

    pub fn snapshot_fails_for(mut self, volume_id: &str) -> Self {
        self.failing_volumes.insert(volume_id.to_string());
        self
    }

    pub fn reboot_fails(mut self, reason: &str) -> Self {
        self.reboot_error = Some(reason.to_string());
        self
    }

    /// Status probes report healthy from the `attempt`-th call on
    pub fn healthy_after(mut self, attempt: u32) -> Self {
        self.healthy_after = Some(attempt);
        self
    }

    pub fn never_healthy(mut self) -> Self {
        self.healthy_after = None;
        self
    }

    pub fn status_fails(mut self, reason: &str) -> Self {
        self.status_error = Some(reason.to_string());
        self
    }

    pub fn describe_count(&self) -> u32 {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn status_count(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn reboot_count(&self) -> usize {
        self.reboot_calls.lock().unwrap().len()
    }

    pub fn reboots(&self) -> Vec<(String, String)> {
        self.reboot_calls.lock().unwrap().clone()
    }

    pub fn snapshot_calls(&self) -> Vec<SnapshotCall> {
        self.snapshot_calls.lock().unwrap().clone()
    }

    fn failure(operation: &str, reason: &str) -> ControlPlaneError {
        ControlPlaneError::RequestFailed {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl ComputeControlPlane for FakeControlPlane {
    async fn describe_volumes(
        &self,
        _region: &str,
        _instance_id: &str,
    ) -> Result<Vec<String>, ControlPlaneError> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.volumes
            .clone()
            .map_err(|reason| Self::failure("describe_volumes", &reason))
    }

    async fn reboot_instance(
        &self,
        region: &str,
        instance_id: &str,
    ) -> Result<(), ControlPlaneError> {
        self.reboot_calls
            .lock()
            .unwrap()
            .push((region.to_string(), instance_id.to_string()));
        match &self.reboot_error {
            Some(reason) => Err(Self::failure("reboot_instance", reason)),
            None => Ok(()),
        }
    }

    async fn instance_status(
        &self,
        _region: &str,
        _instance_id: &str,
    ) -> Result<InstanceStatus, ControlPlaneError> {
        let call = self.status_calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(reason) = &self.status_error {
            return Err(Self::failure("instance_status", reason));
        }

        let healthy = self.healthy_after.map(|n| call >= n).unwrap_or(false);
        Ok(if healthy {
            InstanceStatus {
                state: InstanceState::Running,
                system_status: CheckStatus::Ok,
                instance_status: CheckStatus::Ok,
            }
        } else {
            InstanceStatus {
                state: InstanceState::Running,
                system_status: CheckStatus::Initializing,
                instance_status: CheckStatus::Impaired,
            }
        })
    }
}

#[async_trait]
impl StorageControlPlane for FakeControlPlane {
    async fn create_snapshot(
        &self,
        region: &str,
        volume_id: &str,
        description: &str,
    ) -> Result<String, ControlPlaneError> {
        self.snapshot_calls.lock().unwrap().push(SnapshotCall {
            region: region.to_string(),
            volume_id: volume_id.to_string(),
            description: description.to_string(),
        });

        if self.failing_volumes.contains(volume_id) {
            return Err(Self::failure("create_snapshot", "SnapshotLimitExceeded"));
        }

        Ok(format!("snap-{}", volume_id.trim_start_matches("vol-")))
    }
}
