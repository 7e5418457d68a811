use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docket_core::Error;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid index")]
    InvalidIndex,

    #[error("Index out of range")]
    OutOfRange,

    #[error("{0}")]
    BadRequest(String),

    /// Store failures carry only the operation's generic message.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Map a store error for the operation whose generic failure text is
    /// `failure`.
    pub fn from_store(err: Error, failure: &'static str) -> Self {
        match err {
            Error::OutOfRange { .. } => ApiError::OutOfRange,
            Error::Validation(msg) => ApiError::BadRequest(msg),
            other => {
                error!("{}: {}", failure, other);
                ApiError::Internal(failure)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidIndex | ApiError::OutOfRange | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
