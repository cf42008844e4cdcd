use authors_api::model::{
    author::Author,
    author_service::{
        ApiInfoResponse, CreateAuthorResponse, ListAuthorsResponse, ParsedCreateAuthorRequest,
        ParsedGetAuthorRequest,
    },
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use http::StatusCode;

use crate::{
    author::{
        create_author_command::{CreateAuthorCommand, CreateAuthorCommandInput},
        query_manager::AuthorQueryManager,
        repository::AuthorRepositoryArc,
    },
    error::AppResult,
};

/// Translates HTTP requests into author queries and commands.
#[derive(Debug, Clone)]
pub struct AuthorAdapter {
    author_query_manager: AuthorQueryManager,
    create_author_command: CreateAuthorCommand,
}

impl AuthorAdapter {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        AuthorAdapter {
            author_query_manager: AuthorQueryManager::new(author_repository.clone()),
            create_author_command: CreateAuthorCommand::new(author_repository),
        }
    }

    pub fn api_info(&self) -> ApiInfoResponse {
        ApiInfoResponse::default()
    }

    #[tracing::instrument]
    pub async fn list_authors(&self) -> AppResult<ListAuthorsResponse> {
        Ok(ListAuthorsResponse {
            authors: self.author_query_manager.query_all().await?,
        })
    }

    /// Looks up a single author by the raw `{id}` path segment.
    #[tracing::instrument]
    pub async fn get_author(&self, raw_id: &str) -> AppResult<Author> {
        let request = ParsedGetAuthorRequest::parse(raw_id)?;
        self.author_query_manager.query_one(request.id).await
    }

    /// Validates a raw JSON body and stores the author it describes.
    ///
    /// Nothing is written unless the whole body is valid.
    #[tracing::instrument(skip(body), fields(body_len = body.len()))]
    pub async fn create_author(&self, body: &[u8]) -> AppResult<CreateAuthorResponse> {
        let request = ParsedCreateAuthorRequest::parse_json(body)?;

        let output = self
            .create_author_command
            .execute(CreateAuthorCommandInput {
                author: request.author,
            })
            .await?;

        Ok(CreateAuthorResponse::new(output.author))
    }
}

/// `GET /`
pub async fn api_info(State(adapter): State<AuthorAdapter>) -> Json<ApiInfoResponse> {
    Json(adapter.api_info())
}

/// `GET /authors`
pub async fn list_authors(
    State(adapter): State<AuthorAdapter>,
) -> AppResult<Json<ListAuthorsResponse>> {
    Ok(Json(adapter.list_authors().await?))
}

/// `GET /author/{id}`
pub async fn get_author(
    State(adapter): State<AuthorAdapter>,
    Path(id): Path<String>,
) -> AppResult<Json<Author>> {
    Ok(Json(adapter.get_author(&id).await?))
}

/// `POST /author`
///
/// The body is taken as raw bytes so that decoding failures are reported in
/// the same `detail` format as field violations.
pub async fn create_author(
    State(adapter): State<AuthorAdapter>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<CreateAuthorResponse>)> {
    let response = adapter.create_author(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
