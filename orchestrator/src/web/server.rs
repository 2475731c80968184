// File: orchestrator/src/web/server.rs
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub async fn start_web_server(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // === STAGE INVOCATION ROUTES ===
        .route("/api/stages/notify", post(handlers::run_notice_stage))
        .route("/api/stages/reboot", post(handlers::run_reboot_stage))
        .route("/api/stages/validate", post(handlers::run_validation_stage))
        .route("/api/stages/escalate", post(handlers::run_escalation))
        // === ASYNC EVENT ROUTES ===
        .route(
            "/api/events/escalate",
            post(handlers::accept_escalation_event),
        )
        // === SCHEDULE & LIVENESS ===
        .route("/api/schedule", get(handlers::get_schedule))
        .route("/api/health", get(handlers::health_check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
