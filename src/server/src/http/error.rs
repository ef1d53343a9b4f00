use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced to HTTP callers. Store failures never reach this type:
/// they degrade to an empty list inside the handler.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Missing, non-numeric or non-finite query parameter.
    #[error("Invalid {0} parameter")]
    InvalidParameter(&'static str),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
