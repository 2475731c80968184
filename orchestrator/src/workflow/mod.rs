//! Workflow payloads, results and the best-effort combinator shared by all stages

pub mod best_effort;
pub mod types;

pub use best_effort::{collect_concurrent, collect_sequential, PartialResults};
pub use types::{
    EscalationResult, FailureRecord, HealthWait, InstanceTarget, SnapshotFailure, SnapshotRecord,
    FailureStep, StagePayload, WorkflowResult, WorkflowStep,
};
