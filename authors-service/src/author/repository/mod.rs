use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use authors_api::model::{
    author::{Author, AuthorId},
    error::AuthorResult,
};

pub mod memory;

/// Record store for authors.
///
/// Implementations must make every operation atomic with respect to the
/// others: a reader never observes a partially applied insert.
#[async_trait]
pub trait AuthorRepository: Debug {
    /// Returns all records in insertion order.
    async fn get_all(&self) -> Vec<Author>;

    /// Returns the record for `id`, or [`AuthorError::NotFound`].
    ///
    /// [`AuthorError::NotFound`]: authors_api::model::error::AuthorError::NotFound
    async fn get(&self, id: AuthorId) -> AuthorResult<Author>;

    async fn exists(&self, id: AuthorId) -> bool;

    /// Adds a new record.
    ///
    /// Fails with [`AuthorError::AlreadyExists`] and leaves the stored record
    /// untouched if `author.id` is taken.
    ///
    /// [`AuthorError::AlreadyExists`]: authors_api::model::error::AuthorError::AlreadyExists
    async fn insert(&self, author: Author) -> AuthorResult<()>;

    async fn count(&self) -> usize;
}

pub type AuthorRepositoryArc = Arc<dyn AuthorRepository + Send + Sync>;
