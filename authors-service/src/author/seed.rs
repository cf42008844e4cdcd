use authors_api::model::author::{Author, AuthorId};
use tracing::info;

use crate::{author::repository::AuthorRepositoryArc, error::AppResult};

const UNITED_STATES: &str = "United States";

fn author(
    id: i64,
    name: &str,
    birth_year: i64,
    country_of_birth: &str,
    first_published_date: &str,
    death_date: &str,
) -> Author {
    Author {
        id: AuthorId::new(id),
        name: name.into(),
        birth_year,
        country_of_birth: country_of_birth.into(),
        first_published_date: first_published_date.into(),
        death_date: Some(death_date.into()),
    }
}

/// Returns the records every fresh store starts with, ids 1 through 6.
pub fn initial_authors() -> Vec<Author> {
    vec![
        author(1, "J.R.R. Tolkien", 1892, "South Africa", "1937", "1973"),
        author(2, "Ernest Hemingway", 1899, UNITED_STATES, "1926", "1961"),
        author(3, "F. Scott Fitzgerald", 1896, UNITED_STATES, "1920", "1940"),
        author(4, "Willa Cather", 1873, UNITED_STATES, "1903", "1947"),
        author(5, "Joan Didion", 1934, UNITED_STATES, "1963", "2021"),
        author(6, "Thomas Wolfe", 1900, UNITED_STATES, "1929", "1938"),
    ]
}

/// Inserts [`initial_authors`] into `author_repository`.
///
/// Returns the number of records loaded.
///
/// # Errors
///
/// Fails with an already-exists error if any seed id is taken, so a store
/// can only be seeded once.
pub async fn load_initial_authors(author_repository: &AuthorRepositoryArc) -> AppResult<usize> {
    let authors = initial_authors();
    let count = authors.len();
    for author in authors {
        author_repository.insert(author).await?;
    }
    info!(count, "Loaded initial authors");
    Ok(count)
}
