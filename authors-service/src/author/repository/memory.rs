use std::collections::HashMap;

use async_trait::async_trait;
use authors_api::model::{
    author::{Author, AuthorId},
    error::{AuthorError, AuthorResult},
};
use tokio::sync::RwLock;

use crate::author::repository::AuthorRepository;

/// In-memory implementation of the author repository.
///
/// A single lock guards the whole table.
#[derive(Debug, Default)]
pub struct MemoryAuthorRepository {
    table: RwLock<AuthorTable>,
}

#[derive(Debug, Default)]
struct AuthorTable {
    authors: HashMap<AuthorId, Author>,
    // Insertion order of `authors` keys.
    order: Vec<AuthorId>,
}

impl AuthorTable {
    fn insert(&mut self, author: Author) -> AuthorResult<()> {
        if self.authors.contains_key(&author.id) {
            return Err(AuthorError::AlreadyExists(author.id));
        }
        self.order.push(author.id);
        self.authors.insert(author.id, author);
        Ok(())
    }
}

impl MemoryAuthorRepository {
    /// Creates a new empty memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new memory repository with initial data.
    ///
    /// # Errors
    ///
    /// Returns an already-exists error if two records share an id.
    pub fn with_data(authors: Vec<Author>) -> AuthorResult<Self> {
        let mut table = AuthorTable::default();
        for author in authors {
            table.insert(author)?;
        }
        Ok(Self {
            table: RwLock::new(table),
        })
    }
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn get_all(&self) -> Vec<Author> {
        let table = self.table.read().await;
        table
            .order
            .iter()
            .filter_map(|id| table.authors.get(id))
            .cloned()
            .collect()
    }

    async fn get(&self, id: AuthorId) -> AuthorResult<Author> {
        self.table
            .read()
            .await
            .authors
            .get(&id)
            .cloned()
            .ok_or(AuthorError::NotFound(id))
    }

    async fn exists(&self, id: AuthorId) -> bool {
        self.table.read().await.authors.contains_key(&id)
    }

    async fn insert(&self, author: Author) -> AuthorResult<()> {
        self.table.write().await.insert(author)
    }

    async fn count(&self) -> usize {
        self.table.read().await.order.len()
    }
}
