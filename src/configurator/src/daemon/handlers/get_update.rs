use crate::daemon::error::ApiError;
use crate::daemon::handlers::record_response;
use crate::daemon::state::DaemonState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

pub const UPDATE_ENDPOINT: &str = "/v1/updates/{timestamp}";

pub async fn get_update(
    State(state): State<DaemonState>,
    Path(timestamp): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.orchestrator().get(&timestamp).await?;
    Ok(record_response(&state, &headers, StatusCode::OK, record))
}
