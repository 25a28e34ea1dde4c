use crate::daemon::error::ApiError;
use crate::daemon::state::DaemonState;
use crate::users::User;
use axum::extract::{Path, State};
use axum::Json;

pub const USER_ENDPOINT: &str = "/v1/users/{username}";

pub async fn get_user(
    State(state): State<DaemonState>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users().get(&username)?))
}
