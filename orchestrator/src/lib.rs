pub mod cloud;
pub mod config;
pub mod constants;
pub mod errors;
pub mod health;
pub mod notify;
pub mod scheduler;
pub mod services;
pub mod snapshot;
pub mod web;
pub mod workflow;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use health::{HealthProber, PollPolicy};
pub use scheduler::RebootScheduler;
pub use services::{
    FailureEscalationHandler, NoticeService, PostRebootValidator, RebootExecutor, StageServices,
};
pub use snapshot::SnapshotManager;
pub use workflow::{FailureRecord, InstanceTarget, WorkflowResult};
