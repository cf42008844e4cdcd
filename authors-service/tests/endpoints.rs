use std::sync::Arc;

use authors_service::{
    author::{
        repository::{AuthorRepositoryArc, memory::MemoryAuthorRepository},
        seed::load_initial_authors,
    },
    create_app,
};
use axum::{
    Router,
    body::{Body, to_bytes},
};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt as _;

async fn seeded_app() -> (Router, AuthorRepositoryArc) {
    let author_repository: AuthorRepositoryArc = Arc::new(MemoryAuthorRepository::new());
    load_initial_authors(&author_repository).await.unwrap();
    (create_app(author_repository.clone()), author_repository)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, body: &str) -> (StatusCode, Value) {
    send(app, Method::POST, "/author", Some(body)).await
}

fn morrison() -> Value {
    json!({
        "id": 7,
        "name": "Toni Morrison",
        "birth_year": 1931,
        "country_of_birth": "United States",
        "first_published_date": "1970"
    })
}

#[tokio::test]
async fn api_info() {
    let (app, _) = seeded_app().await;
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Authors REST API",
            "endpoints": {
                "GET /authors": "Get all authors",
                "GET /author/{id}": "Get author by ID",
                "POST /author": "Create a new author"
            }
        })
    );
}

#[tokio::test]
async fn list_seeded_authors() {
    let (app, _) = seeded_app().await;
    let (status, body) = get(&app, "/authors").await;
    assert_eq!(status, StatusCode::OK);

    let authors = body["authors"].as_array().unwrap();
    let ids: Vec<_> = authors.iter().map(|author| author["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(
        authors[0],
        json!({
            "id": 1,
            "name": "J.R.R. Tolkien",
            "birth_year": 1892,
            "country_of_birth": "South Africa",
            "first_published_date": "1937",
            "death_date": "1973"
        })
    );
}

#[tokio::test]
async fn seeded_authors_retrievable() {
    let (app, _) = seeded_app().await;
    let (_, list) = get(&app, "/authors").await;

    for id in 1..=6usize {
        let (status, body) = get(&app, &format!("/author/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, list["authors"][id - 1]);
    }
}

#[tokio::test]
async fn list_is_stable_without_writes() {
    let (app, _) = seeded_app().await;
    let first = get(&app, "/authors").await;
    let (status, _) = get(&app, "/author/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let second = get(&app, "/authors").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn get_author() {
    let (app, _) = seeded_app().await;
    let (status, body) = get(&app, "/author/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Joan Didion");
    assert_eq!(body["death_date"], "2021");

    let again = get(&app, "/author/5").await;
    assert_eq!(again, (status, body));
}

#[tokio::test]
async fn get_missing_author() {
    let (app, _) = seeded_app().await;
    let (status, body) = get(&app, "/author/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Author with id 999 not found" }));
}

#[tokio::test]
async fn get_author_invalid_id() {
    let (app, _) = seeded_app().await;
    let (status, body) = get(&app, "/author/abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["path", "id"]));
    assert_eq!(body["detail"][0]["type"], "int_parsing");
    assert_eq!(body["detail"][0]["input"], "abc");
}

#[tokio::test]
async fn create_author() {
    let (app, author_repository) = seeded_app().await;
    let (status, body) = post(&app, &morrison().to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Author created successfully");
    assert_eq!(body["author"]["id"], 7);
    assert_eq!(body["author"]["death_date"], Value::Null);
    assert_eq!(author_repository.count().await, 7);

    let (status, body) = get(&app, "/author/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Toni Morrison");
    assert!(body.as_object().unwrap().contains_key("death_date"));
    assert_eq!(body["death_date"], Value::Null);

    let (_, body) = get(&app, "/authors").await;
    assert_eq!(body["authors"].as_array().unwrap().len(), 7);
    assert_eq!(body["authors"][6]["id"], 7);
}

#[tokio::test]
async fn create_duplicate_author() {
    let (app, author_repository) = seeded_app().await;
    let (_, before) = get(&app, "/author/1").await;

    let mut author = morrison();
    author["id"] = json!(1);
    let (status, body) = post(&app, &author.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Author with id 1 already exists" }));

    let (_, after) = get(&app, "/author/1").await;
    assert_eq!(before, after);
    assert_eq!(author_repository.count().await, 6);
}

#[tokio::test]
async fn create_author_missing_field() {
    let (app, author_repository) = seeded_app().await;
    let mut author = morrison();
    author.as_object_mut().unwrap().remove("name");

    let (status, body) = post(&app, &author.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "detail": [{
                "loc": ["body", "name"],
                "msg": "Field required",
                "type": "missing",
                "input": author
            }]
        })
    );
    assert_eq!(author_repository.count().await, 6);
}

#[tokio::test]
async fn create_author_multiple_violations() {
    let (app, author_repository) = seeded_app().await;
    let (status, body) = post(
        &app,
        r#"{"id": "seven", "birth_year": 1931.5, "country_of_birth": 1, "first_published_date": "1970"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let violations: Vec<_> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|violation| {
            (
                violation["loc"][1].as_str().unwrap().to_string(),
                violation["type"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        violations,
        vec![
            ("id".to_string(), "int_parsing".to_string()),
            ("name".to_string(), "missing".to_string()),
            ("birth_year".to_string(), "int_from_float".to_string()),
            ("country_of_birth".to_string(), "string_type".to_string()),
        ]
    );
    assert_eq!(author_repository.count().await, 6);
}

#[tokio::test]
async fn create_author_coerces_integers() {
    let (app, _) = seeded_app().await;
    let mut author = morrison();
    author["id"] = json!("7");
    author["birth_year"] = json!(2000.0);

    let (status, body) = post(&app, &author.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"]["id"], 7);
    assert_eq!(body["author"]["birth_year"], 2000);

    let (status, body) = get(&app, "/author/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["birth_year"], 2000);
}

#[tokio::test]
async fn create_author_invalid_body() {
    let (app, author_repository) = seeded_app().await;

    let (status, body) = post(&app, "{not json").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");

    let (status, body) = post(&app, "[1, 2]").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));
    assert_eq!(body["detail"][0]["type"], "model_attributes_type");

    assert_eq!(author_repository.count().await, 6);
}

#[tokio::test]
async fn unknown_route() {
    let (app, _) = seeded_app().await;
    let (status, body) = get(&app, "/books").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not Found" }));
}

#[tokio::test]
async fn method_not_allowed() {
    let (app, author_repository) = seeded_app().await;
    let (status, body) = send(&app, Method::DELETE, "/author/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "detail": "Method Not Allowed" }));
    assert_eq!(author_repository.count().await, 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_same_id() {
    let (app, author_repository) = seeded_app().await;
    let body = morrison().to_string();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = app.clone();
            let body = body.clone();
            tokio::spawn(async move { post(&app, &body).await.0 })
        })
        .collect();

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => rejected += 1,
            status => panic!("unexpected status {status}"),
        }
    }
    assert_eq!((created, rejected), (1, 7));
    assert_eq!(author_repository.count().await, 7);
}
