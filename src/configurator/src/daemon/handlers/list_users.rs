use crate::daemon::error::ApiError;
use crate::daemon::state::DaemonState;
use crate::users::User;
use axum::extract::State;
use axum::Json;

pub const USERS_ENDPOINT: &str = "/v1/users";

pub async fn list_users(State(state): State<DaemonState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users().list()?))
}
