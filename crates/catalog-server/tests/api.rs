//! Integration tests for the book and todo HTTP endpoints.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use catalog_core::Book;
use catalog_server::services::Catalog;
use catalog_server::storage::{Database, MemoryStore};
use catalog_server::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    db: Database,
    db_path: PathBuf,
}

impl TestApp {
    async fn new() -> Self {
        let db_path =
            std::env::temp_dir().join(format!("catalog_api_{}.db", uuid::Uuid::new_v4()));
        let db = Database::new(&db_path.to_string_lossy(), 2)
            .await
            .expect("open database");

        let state = AppState {
            books: Catalog::new(Arc::new(MemoryStore::with_records(Book::samples()))),
            todos: Catalog::new(Arc::new(db.todos())),
        };

        Self {
            router: app(state),
            db,
            db_path,
        }
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value), String> {
        let builder = Request::builder().method(method).uri(uri);

        let req = if let Some(payload) = body {
            let bytes = serde_json::to_vec(&payload)
                .map_err(|err| format!("serialize request body: {err}"))?;
            builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(bytes))
                .map_err(|err| format!("build request: {err}"))?
        } else {
            builder
                .body(Body::empty())
                .map_err(|err| format!("build request: {err}"))?
        };

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .map_err(|err| format!("route request: {err}"))?;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .map_err(|err| format!("read response body: {err}"))?;

        let parsed = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).map_err(|err| format!("parse response body: {err}"))?
        };
        Ok((status, parsed))
    }

    async fn shutdown(self) {
        self.db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.db_path.display(), suffix));
        }
    }
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .map(|items| items.iter().filter_map(|b| b["id"].as_i64()).collect())
        .unwrap_or_default()
}

fn new_book() -> Value {
    json!({
        "title": "A New Book",
        "author": "Arpan Moitra",
        "description": "A description for this book",
        "published_date": 2024,
        "rating": 5
    })
}

fn new_todo() -> Value {
    json!({
        "title": "Buy a Book",
        "description": "Arpan Moitra's book",
        "priority": 4,
        "complete": false
    })
}

#[tokio::test]
async fn health_reports_ok() -> Result<(), String> {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn list_and_get_books() -> Result<(), String> {
    let app = TestApp::new().await;

    let (status, list) = app.request(Method::GET, "/books", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), vec![1, 2, 3, 4, 5, 6]);

    let (status, book) = app.request(Method::GET, "/books/4", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "Learning Marketing");

    let (status, body) = app.request(Method::GET, "/books/40", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = app.request(Method::GET, "/books/0", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn filter_books_by_query() -> Result<(), String> {
    let app = TestApp::new().await;

    let (status, list) = app
        .request(Method::GET, "/books?author=arpan%20moitra", None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), vec![1, 2]);

    let (_, list) = app
        .request(Method::GET, "/books?published_date=2021&rating=4.9", None)
        .await?;
    assert_eq!(ids(&list), vec![3]);

    // Zero matches is an empty list, not an error
    let (status, list) = app
        .request(Method::GET, "/books?author=Arpan%20Moitra&category=history", None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let (status, body) = app
        .request(Method::GET, "/books?published_date=1500", None)
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "published_date");

    let (status, _) = app.request(Method::GET, "/books?publisher=x", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn create_update_delete_book() -> Result<(), String> {
    let app = TestApp::new().await;

    let (status, created) = app.request(Method::POST, "/books", Some(new_book())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 7);
    assert_eq!(created["title"], "A New Book");

    let mut replacement = new_book();
    replacement["id"] = json!(7);
    replacement["title"] = json!("A Revised Book");
    replacement["category"] = json!("science");
    let (status, body) = app.request(Method::PUT, "/books", Some(replacement)).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, fetched) = app.request(Method::GET, "/books/7", None).await?;
    assert_eq!(fetched["title"], "A Revised Book");
    assert_eq!(fetched["category"], "science");

    let (status, _) = app.request(Method::DELETE, "/books/7", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.request(Method::GET, "/books/7", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request(Method::DELETE, "/books/7", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn invalid_book_is_rejected_without_side_effects() -> Result<(), String> {
    let app = TestApp::new().await;

    let mut payload = new_book();
    payload["title"] = json!("AB");
    payload["rating"] = json!(6);
    let (status, body) = app.request(Method::POST, "/books", Some(payload)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "validation_error");
    let fields: Vec<_> = body["details"]
        .as_array()
        .map(|d| d.iter().filter_map(|e| e["field"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(fields, vec!["title", "rating"]);

    let (_, list) = app.request(Method::GET, "/books", None).await?;
    assert_eq!(ids(&list).len(), 6);

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn update_unknown_book_is_not_found() -> Result<(), String> {
    let app = TestApp::new().await;

    let mut replacement = new_book();
    replacement["id"] = json!(50);
    let (status, _) = app.request(Method::PUT, "/books", Some(replacement)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request(Method::PUT, "/books", Some(new_book())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app.request(Method::GET, "/books", None).await?;
    assert_eq!(ids(&list), vec![1, 2, 3, 4, 5, 6]);

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn todo_lifecycle() -> Result<(), String> {
    let app = TestApp::new().await;

    let (status, list) = app.request(Method::GET, "/todos", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let (status, created) = app.request(Method::POST, "/todos", Some(new_todo())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);

    let mut done = new_todo();
    done["complete"] = json!(true);
    let (status, _) = app.request(Method::PUT, "/todos/1", Some(done)).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fetched) = app.request(Method::GET, "/todos/1", None).await?;
    assert_eq!(fetched["complete"], true);
    assert_eq!(fetched["priority"], 4);

    let (_, list) = app.request(Method::GET, "/todos?complete=true", None).await?;
    assert_eq!(ids(&list), vec![1]);

    let (status, _) = app.request(Method::PUT, "/todos/2", Some(new_todo())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request(Method::DELETE, "/todos/1", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.request(Method::GET, "/todos/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn invalid_todo_is_rejected() -> Result<(), String> {
    let app = TestApp::new().await;

    let mut payload = new_todo();
    payload["priority"] = json!(0);
    let (status, body) = app.request(Method::POST, "/todos", Some(payload)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "priority");

    let (_, list) = app.request(Method::GET, "/todos", None).await?;
    assert_eq!(list, json!([]));

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn malformed_path_id_gets_json_validation_error() -> Result<(), String> {
    let app = TestApp::new().await;

    for (method, uri) in [
        (Method::GET, "/books/abc"),
        (Method::DELETE, "/books/abc"),
        (Method::GET, "/books/99999999999999999999"),
        (Method::GET, "/todos/abc"),
    ] {
        let (status, body) = app.request(method, uri, None).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body["code"], "validation_error", "{uri}");
        assert_eq!(body["details"][0]["field"], "id", "{uri}");
    }

    let (status, body) = app.request(Method::PUT, "/todos/abc", Some(new_todo())).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "validation_error");

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn malformed_body_gets_json_error() -> Result<(), String> {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .map_err(|err| format!("build request: {err}"))?;
    let response = app
        .router
        .clone()
        .oneshot(req)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .map_err(|err| format!("read response body: {err}"))?;
    let body: Value =
        serde_json::from_slice(&bytes).map_err(|err| format!("parse response body: {err}"))?;
    assert_eq!(body["code"], "invalid_payload");
    assert!(body["error"].is_string());

    let (_, list) = app.request(Method::GET, "/books", None).await?;
    assert_eq!(ids(&list).len(), 6);

    app.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn put_with_non_positive_body_id_is_not_found() -> Result<(), String> {
    let app = TestApp::new().await;

    let mut replacement = new_book();
    replacement["id"] = json!(0);
    let (status, body) = app.request(Method::PUT, "/books", Some(replacement)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    app.shutdown().await;
    Ok(())
}
