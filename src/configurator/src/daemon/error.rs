use crate::daemon::structs::JsonResponse;
use crate::updates::UpdateError;
use crate::users::UserError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

/// A failed request, rendered as the `{code, status, title, detail}` envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    title: &'static str,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            title,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Cannot parse json", detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<UpdateError> for ApiError {
    fn from(err: UpdateError) -> Self {
        let (status, title) = match &err {
            UpdateError::NotFound { .. } => (StatusCode::NOT_FOUND, "Cannot find update"),
            UpdateError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "Cannot read updates"),
            UpdateError::CorruptLog { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Cannot find PID in update log",
            ),
            UpdateError::DuplicateTimestamp { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ambiguous update logs")
            }
            UpdateError::Launch(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Cannot run update"),
        };
        Self::new(status, title, err.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        let (status, title) = match &err {
            UserError::InvalidUsername | UserError::InvalidPassword => {
                (StatusCode::FORBIDDEN, "Invalid user")
            }
            UserError::NotFound { .. } => (StatusCode::NOT_FOUND, "User is not found"),
            UserError::Io { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Cannot update password file",
            ),
        };
        Self::new(status, title, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("{}: {}", self.title, self.detail);
        } else {
            debug!("{}: {}", self.title, self.detail);
        }

        let body = JsonResponse::new(self.status, self.title, self.detail);
        (self.status, Json(body)).into_response()
    }
}
