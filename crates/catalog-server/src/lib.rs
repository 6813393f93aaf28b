//! Catalog Server
//!
//! REST CRUD over the book catalog (in memory) and the todo list (SQLite).

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod storage;

use axum::{routing::get, Router};
use catalog_core::{Book, Todo};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use services::Catalog;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub books: Catalog<Book>,
    pub todos: Catalog<Todo>,
}

/// Build the HTTP router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(handlers::records::routes("/books", state.books))
        .merge(handlers::records::routes("/todos", state.todos))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
