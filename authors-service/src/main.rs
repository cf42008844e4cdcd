//! Authors REST Service
//!
//! An HTTP service exposing an in-memory collection of authors.
//!
//! ## Features
//!
//! - List, fetch and create authors as JSON
//! - Field-level validation errors
//! - Layered configuration from files and environment
//! - Structured logging and span export

use std::sync::Arc;

use tracing::info;

use authors_service::{
    author::{
        repository::{AuthorRepositoryArc, memory::MemoryAuthorRepository},
        seed::load_initial_authors,
    },
    config::AppConfig,
    error::AppResult,
    server,
    tracing::tracer::Tracer,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::load()?;

    Tracer::install(&config)?;

    info!(
        "Starting {} v{}",
        config.distribution.name,
        config.distribution.version.as_deref().unwrap_or("unknown"),
    );

    start(&config).await?;

    Ok(())
}

async fn start(config: &AppConfig) -> AppResult<()> {
    let author_repository: AuthorRepositoryArc = Arc::new(MemoryAuthorRepository::new());
    load_initial_authors(&author_repository).await?;

    server::run(config, author_repository).await
}
