pub mod create_user;
pub mod delete_update;
pub mod delete_user;
pub mod get_update;
pub mod get_user;
pub mod list_updates;
pub mod list_users;
pub mod run_update;

use crate::daemon::state::DaemonState;
use crate::daemon::structs::JsonResponse;
use crate::updates::UpdateRecord;
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

/// Record envelope plus a `Location` pointing back at the record.
fn record_response(
    state: &DaemonState,
    headers: &HeaderMap,
    code: StatusCode,
    record: UpdateRecord,
) -> impl IntoResponse {
    let location = state.location(headers, &format!("/v1/updates/{}", record.timestamp));
    (
        code,
        [(LOCATION, location)],
        Json(JsonResponse::from_record(code, record)),
    )
}
