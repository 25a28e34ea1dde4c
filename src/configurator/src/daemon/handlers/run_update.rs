use crate::daemon::error::ApiError;
use crate::daemon::handlers::record_response;
use crate::daemon::state::DaemonState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use tracing::info;

/// Blocks for at most the configured launch timeout. Dropping the request does
/// not stop an updater that was already spawned.
pub async fn run_update(
    State(state): State<DaemonState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    info!("update requested");
    let record = state.orchestrator().run().await?;
    Ok(record_response(&state, &headers, StatusCode::ACCEPTED, record))
}
