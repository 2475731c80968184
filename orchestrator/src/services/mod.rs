// File: orchestrator/src/services/mod.rs

pub mod dispatch;
pub mod escalation;
pub mod notice_service;
pub mod reboot_executor;
pub mod stages;
pub mod ticketing;
pub mod validator;

pub use dispatch::{EscalationDispatcher, HttpDispatcher, InProcessDispatcher};
pub use escalation::FailureEscalationHandler;
pub use notice_service::NoticeService;
pub use reboot_executor::RebootExecutor;
pub use stages::{Collaborators, StageServices};
pub use ticketing::{LoggingTicketUpdater, TicketUpdater};
pub use validator::PostRebootValidator;
