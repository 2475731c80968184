// File: orchestrator/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use orchestrator::config::ConfigManager;
use orchestrator::scheduler::RebootScheduler;
use orchestrator::services::StageServices;
use orchestrator::web::{start_web_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("orchestrator=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("tokio_cron_scheduler=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting Reboot Orchestrator");

    let config_dir =
        std::env::var("ORCHESTRATOR_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config_manager = ConfigManager::new(config_dir).await?;
    let config = config_manager.get_current_config();
    let policy = config.health_check.poll_policy();
    info!(
        "Configuration loaded: {} targets, schedule timezone {}, health wait up to {}s ({}x{}s)",
        config.targets.len(),
        config.schedule_timezone,
        policy.ceiling().as_secs(),
        policy.max_attempts,
        policy.delay.as_secs()
    );

    let stages = Arc::new(StageServices::from_config(&config)?);
    info!("Stage services initialized");

    let scheduler = RebootScheduler::new(stages.clone(), config.timezone()?).await?;
    let scheduled_count = scheduler.register_targets(&config.targets).await?;
    if scheduled_count > 0 {
        scheduler.start().await?;
        info!("Scheduler started with {} triggers", scheduled_count);
    } else {
        warn!("No future triggers registered - scheduler not started");
    }

    start_web_server(AppState::new(config, stages)).await?;

    Ok(())
}
