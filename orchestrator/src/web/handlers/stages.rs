// Stage invocation endpoints
//
// Each stage takes the target payload and always answers 200 with a structured
// result; failures inside a stage are part of the result, not an HTTP error.

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::info;

use super::common::ApiResponse;
use crate::web::AppState;
use crate::workflow::{EscalationResult, FailureRecord, InstanceTarget, WorkflowResult};

/// Pre-reboot notice (T-1h)
pub async fn run_notice_stage(
    State(state): State<AppState>,
    Json(target): Json<InstanceTarget>,
) -> Json<WorkflowResult> {
    info!("Notice stage invoked for {}", target.instance_id);
    Json(state.stages.notice.send_notice(&target).await)
}

/// Snapshot + reboot + health wait (T)
pub async fn run_reboot_stage(
    State(state): State<AppState>,
    Json(target): Json<InstanceTarget>,
) -> Json<WorkflowResult> {
    info!("Reboot stage invoked for {}", target.instance_id);
    Json(state.stages.reboot.execute(&target).await)
}

/// Post-reboot validation (T+5m)
pub async fn run_validation_stage(
    State(state): State<AppState>,
    Json(target): Json<InstanceTarget>,
) -> Json<WorkflowResult> {
    info!("Validation stage invoked for {}", target.instance_id);
    Json(state.stages.validator.validate(&target).await)
}

/// Run the escalation handler and return its result
pub async fn run_escalation(
    State(state): State<AppState>,
    Json(record): Json<FailureRecord>,
) -> Json<EscalationResult> {
    info!(
        "Escalation invoked for {} (step {})",
        record.instance_id, record.step
    );
    Json(state.stages.escalation.handle(record).await)
}

/// Accept a failure record and run the handler in the background
pub async fn accept_escalation_event(
    State(state): State<AppState>,
    Json(record): Json<FailureRecord>,
) -> (StatusCode, Json<ApiResponse<String>>) {
    let instance_id = record.instance_id.clone();
    info!("Escalation event accepted for {}", instance_id);

    let handler = state.stages.escalation.clone();
    tokio::spawn(async move {
        let result = handler.handle(record).await;
        info!("Escalation event finished with status {}", result.status());
    });

    (
        StatusCode::ACCEPTED,
        Json(ApiResponse::accepted(
            instance_id,
            "Escalation queued".to_string(),
        )),
    )
}
