use crate::daemon::error::ApiError;
use crate::daemon::state::DaemonState;
use crate::daemon::structs::JsonResponse;
use axum::extract::{Path, State};
use axum::Json;

pub async fn delete_update(
    State(state): State<DaemonState>,
    Path(timestamp): Path<String>,
) -> Result<Json<JsonResponse>, ApiError> {
    state.orchestrator().delete(&timestamp).await?;
    Ok(Json(JsonResponse::success()))
}
