//! HTTP request handlers for the orchestrator API.
//!
//! - `common` - Shared response envelope
//! - `schedule` - Trigger preview and liveness
//! - `stages` - Stage invocation endpoints

pub mod common;
pub mod schedule;
pub mod stages;

pub use schedule::*;
pub use stages::*;
