use crate::daemon::error::ApiError;
use crate::daemon::state::DaemonState;
use axum::extract::State;
use axum::Json;

pub const UPDATES_ENDPOINT: &str = "/v1/updates";

pub async fn list_updates(State(state): State<DaemonState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.orchestrator().list().await?))
}
