use thiserror::Error;

use crate::model::author::AuthorId;

/// Domain errors raised by author store operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorError {
    #[error("Author with id {0} not found")]
    NotFound(AuthorId),
    #[error("Author with id {0} already exists")]
    AlreadyExists(AuthorId),
}

pub type AuthorResult<T> = Result<T, AuthorError>;
