//! axum server wiring.
//!
//! The router exposes:
//! - `GET /` with API metadata
//! - `GET /authors`, `GET /author/{id}` and `POST /author`
//! - JSON `detail` bodies for unknown routes and unsupported methods

use authors_api::error::ErrorResponse;
use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, post},
};
use http::StatusCode;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{
    author::{adapter, adapter::AuthorAdapter, repository::AuthorRepositoryArc},
    config::AppConfig,
    error::AppResult,
};

/// Builds the HTTP application on top of `author_repository`.
pub fn create_app(author_repository: AuthorRepositoryArc) -> Router {
    Router::new()
        .route("/", get(adapter::api_info))
        .route("/authors", get(adapter::list_authors))
        .route("/author", post(adapter::create_author))
        .route("/author/{id}", get(adapter::get_author))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(AuthorAdapter::new(author_repository))
}

async fn not_found() -> impl IntoResponse {
    status_detail(StatusCode::NOT_FOUND)
}

async fn method_not_allowed() -> impl IntoResponse {
    status_detail(StatusCode::METHOD_NOT_ALLOWED)
}

fn status_detail(status: StatusCode) -> (StatusCode, Json<ErrorResponse<&'static str>>) {
    (
        status,
        Json(ErrorResponse::new(status.canonical_reason().unwrap_or_default())),
    )
}

/// Serves the application on `config.server.http_address` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run(config: &AppConfig, author_repository: AuthorRepositoryArc) -> AppResult<()> {
    let app = create_app(author_repository);

    let listener = TcpListener::bind(config.server.http_address).await?;
    info!("HTTP server started at {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", err);
    }
}
