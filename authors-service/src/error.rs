use authors_api::{
    error::{ErrorResponse, RequestError},
    model::error::AuthorError,
};
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use tracing::error;

/// Application error types.
///
/// Represents all possible errors that can occur in the authors service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Internal application error.
    ///
    /// Configuration, I/O and tracing setup failures. Never caused by a client.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// Request validation error.
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// Author store error.
    #[error("author error: {0}")]
    Author(#[from] AuthorError),
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(config::ConfigError, std::io::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Author(AuthorError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Author(AuthorError::AlreadyExists(_)) => StatusCode::BAD_REQUEST,
            AppError::Request(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// Converts application errors to `{"detail": ...}` JSON responses.
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Author(err) => {
                (status, Json(ErrorResponse::new(err.to_string()))).into_response()
            }
            AppError::Request(err) => {
                (status, Json(ErrorResponse::new(err.violations()))).into_response()
            }
            AppError::Internal(err) => {
                error!("internal service error: {}", err);
                (
                    status,
                    Json(ErrorResponse::new(
                        status.canonical_reason().unwrap_or("Internal Server Error"),
                    )),
                )
                    .into_response()
            }
        }
    }
}
