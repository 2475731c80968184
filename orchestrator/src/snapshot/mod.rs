//! Pre-reboot volume snapshots
//!
//! Snapshots are a safety net, not a precondition for rebooting:
//!
//! - Each attached volume gets one point-in-time snapshot request
//! - A failed request is recorded for that volume only; siblings still run
//! - The caller receives both the snapshot records and the per-volume failures

pub mod manager;

pub use manager::SnapshotManager;
