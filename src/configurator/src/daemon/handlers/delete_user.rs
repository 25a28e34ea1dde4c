use crate::daemon::error::ApiError;
use crate::daemon::state::DaemonState;
use crate::daemon::structs::JsonResponse;
use axum::extract::{Path, State};
use axum::Json;

pub async fn delete_user(
    State(state): State<DaemonState>,
    Path(username): Path<String>,
) -> Result<Json<JsonResponse>, ApiError> {
    state.users().remove(&username)?;
    Ok(Json(JsonResponse::success()))
}
