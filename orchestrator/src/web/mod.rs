// File: orchestrator/src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::config::Config;
use crate::services::StageServices;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stages: Arc<StageServices>,
}

impl AppState {
    pub fn new(config: Arc<Config>, stages: Arc<StageServices>) -> Self {
        Self { config, stages }
    }
}
