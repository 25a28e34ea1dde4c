use crate::daemon::error::ApiError;
use crate::daemon::state::DaemonState;
use crate::daemon::structs::NewUser;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_user(
    State(state): State<DaemonState>,
    headers: HeaderMap,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new_user) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    state
        .users()
        .set_password(&new_user.username, &new_user.password)?;
    let user = state.users().get(&new_user.username)?;

    let location = state.location(&headers, &format!("/v1/users/{}", user.username));
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(user)))
}
