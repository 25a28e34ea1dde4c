use crate::updates::UpdateRecord;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Envelope shared by record reads, success acknowledgements and every error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
    pub code: u16,
    pub status: String,
    pub title: String,
    pub detail: String,
}

impl JsonResponse {
    pub fn new(code: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            status: code.canonical_reason().unwrap_or_default().to_string(),
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn success() -> Self {
        Self::new(StatusCode::OK, "success", "")
    }

    /// Title carries the run status, detail the raw log.
    pub fn from_record(code: StatusCode, record: UpdateRecord) -> Self {
        Self::new(code, record.status.as_str(), record.content)
    }
}

/// Body of `POST /v1/users`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}
