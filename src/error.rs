use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const ERROR_MESSAGE_HEADER: HeaderName = HeaderName::from_static("x-error-message");
pub const USERNAME_TAKEN_MESSAGE: &str = "User with this name is already registered";

/// Failures surfaced to HTTP clients. Bodies are always empty; the status
/// code carries the outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("malformed request")]
    BadRequest,
    #[error("missing, invalid or expired credentials")]
    Unauthorized,
    #[error("username already registered")]
    UsernameTaken,
    #[error("conflicting write")]
    Conflict,
    #[error("resource not found")]
    NotFound,
    #[error("unsupported sort value")]
    UnprocessableSort,
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UsernameTaken | ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UnprocessableSort => StatusCode::MISDIRECTED_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::UsernameTaken => (
                status,
                [(
                    ERROR_MESSAGE_HEADER,
                    HeaderValue::from_static(USERNAME_TAKEN_MESSAGE),
                )],
            )
                .into_response(),
            _ => status.into_response(),
        }
    }
}
