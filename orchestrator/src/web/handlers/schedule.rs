// Schedule preview and liveness endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use super::common::{ApiResponse, ApiResult};
use crate::scheduler::{plan_triggers, TriggerPlan};
use crate::web::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub instance_id: String,
    pub hostname: String,
    pub externally_managed: bool,
    pub triggers: Vec<TriggerPlan>,
    pub error: Option<String>,
}

/// Planned triggers for every configured target
pub async fn get_schedule(State(state): State<AppState>) -> ApiResult<Vec<ScheduleEntry>> {
    let timezone = match state.config.timezone() {
        Ok(timezone) => timezone,
        Err(e) => {
            error!("Cannot build schedule preview: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            ));
        }
    };

    let entries = state
        .config
        .targets
        .iter()
        .map(|target| {
            let (triggers, error) = match plan_triggers(target, timezone) {
                Ok(triggers) => (triggers, None),
                Err(e) => (Vec::new(), Some(e.to_string())),
            };
            ScheduleEntry {
                instance_id: target.instance_id.clone(),
                hostname: target.hostname.clone(),
                externally_managed: target.is_externally_managed(),
                triggers,
                error,
            }
        })
        .collect();

    Ok(Json(ApiResponse::success(entries)))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
