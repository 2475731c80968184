// File: orchestrator/src/snapshot/manager.rs
use std::sync::Arc;
use tracing::{info, warn};

use crate::cloud::StorageControlPlane;
use crate::errors::ControlPlaneError;
use crate::workflow::{collect_sequential, PartialResults, SnapshotFailure, SnapshotRecord};

pub struct SnapshotManager {
    storage: Arc<dyn StorageControlPlane>,
}

impl SnapshotManager {
    pub fn new(storage: Arc<dyn StorageControlPlane>) -> Self {
        Self { storage }
    }

    /// Request one snapshot for one volume
    pub async fn snapshot_volume(
        &self,
        region: &str,
        volume_id: &str,
        description: &str,
    ) -> Result<SnapshotRecord, ControlPlaneError> {
        let snapshot_id = self
            .storage
            .create_snapshot(region, volume_id, description)
            .await?;

        Ok(SnapshotRecord {
            volume_id: volume_id.to_string(),
            snapshot_id,
        })
    }

    /// Snapshot every volume, one at a time, skipping failures
    pub async fn snapshot_all(
        &self,
        region: &str,
        volume_ids: &[String],
        hostname: &str,
    ) -> PartialResults<SnapshotRecord, SnapshotFailure> {
        let description = format!("Pre-reboot snapshot for {}", hostname);

        let results = collect_sequential(volume_ids, |volume_id| {
            let description = description.as_str();
            async move {
                match self.snapshot_volume(region, volume_id, description).await {
                    Ok(record) => {
                        info!("Created snapshot {} for {}", record.snapshot_id, volume_id);
                        Ok(record)
                    }
                    Err(e) => {
                        warn!("Failed to snapshot {}: {}", volume_id, e);
                        Err(SnapshotFailure {
                            volume_id: volume_id.clone(),
                            error: e.to_string(),
                        })
                    }
                }
            }
        })
        .await;

        if results.all_failed() {
            warn!(
                "No snapshots succeeded for {} ({} volumes attempted)",
                hostname,
                results.attempted()
            );
        }

        results
    }
}
