use authors_api::model::{author::Author, error::AuthorError};
use tracing::{info, warn};

use crate::{author::repository::AuthorRepositoryArc, error::AppResult};

/// Command for creating new authors.
///
/// Ids are chosen by the client. The repository repeats the existence check
/// under its write lock, so of two concurrent creates with the same id
/// exactly one succeeds.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommand {
    author_repository: AuthorRepositoryArc,
}

/// Input data for creating an author.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommandInput {
    /// Validated author record
    pub author: Author,
}

/// Output data from author creation.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommandOutput {
    /// The stored author record
    pub author: Author,
}

impl CreateAuthorCommand {
    /// Creates a new `CreateAuthorCommand`.
    ///
    /// # Arguments
    ///
    /// * `author_repository` - Repository for persisting author data
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        Self { author_repository }
    }

    /// Executes the author creation command.
    ///
    /// # Errors
    ///
    /// Returns an already-exists error if the id is taken. The stored record
    /// is left unchanged in that case.
    #[tracing::instrument]
    pub async fn execute(
        &self,
        input: CreateAuthorCommandInput,
    ) -> AppResult<CreateAuthorCommandOutput> {
        let id = input.author.id;
        info!(author_id = %id, name = %input.author.name, "Creating author");

        if self.author_repository.exists(id).await {
            warn!(author_id = %id, "Author already exists");
            return Err(AuthorError::AlreadyExists(id).into());
        }

        // A concurrent create may have taken the id since the check.
        if let Err(err) = self.author_repository.insert(input.author).await {
            warn!(author_id = %id, "Rejected author: {}", err);
            return Err(err.into());
        }

        let author = self.author_repository.get(id).await?;

        info!(author_id = %id, "Successfully created author");

        Ok(CreateAuthorCommandOutput { author })
    }
}
