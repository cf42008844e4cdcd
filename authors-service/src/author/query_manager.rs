use authors_api::model::author::{Author, AuthorId};
use tracing::debug;

use crate::{author::repository::AuthorRepositoryArc, error::AppResult};

#[derive(Debug, Clone)]
pub struct AuthorQueryManager {
    author_repository: AuthorRepositoryArc,
}

impl AuthorQueryManager {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        AuthorQueryManager { author_repository }
    }

    /// Returns every stored author in insertion order.
    pub async fn query_all(&self) -> AppResult<Vec<Author>> {
        let authors = self.author_repository.get_all().await;
        debug!(count = authors.len(), "Queried all authors");
        Ok(authors)
    }

    pub async fn query_one(&self, id: AuthorId) -> AppResult<Author> {
        debug!(author_id = %id, "Querying author");
        Ok(self.author_repository.get(id).await?)
    }
}
