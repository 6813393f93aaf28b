//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog_core::{CatalogError, Record, RecordStore, Todo};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // INTEGER PRIMARY KEY without AUTOINCREMENT: new rowids are max(id) + 1
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                priority INTEGER NOT NULL,
                complete BOOLEAN NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub fn todos(&self) -> TodoTable {
        TodoTable {
            pool: self.pool.clone(),
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// The `todos` table.
///
/// Each operation checks out one pooled connection and hands it back when
/// the connection guard drops, whether the operation succeeded or not.
#[derive(Clone)]
pub struct TodoTable {
    pool: SqlitePool,
}

impl TodoTable {
    async fn session(&self) -> catalog_core::Result<PoolConnection<Sqlite>> {
        self.pool.acquire().await.map_err(storage_err)
    }
}

#[async_trait]
impl RecordStore<Todo> for TodoTable {
    async fn list_all(&self) -> catalog_core::Result<Vec<Todo>> {
        let mut conn = self.session().await?;
        let rows: Vec<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, priority, complete
            FROM todos ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_by_id(&self, id: i64) -> catalog_core::Result<Todo> {
        let mut conn = self.session().await?;
        let row: Option<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, priority, complete
            FROM todos WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(storage_err)?;

        row.map(|r| r.into())
            .ok_or_else(|| CatalogError::not_found(Todo::KIND, id))
    }

    async fn insert(&self, mut todo: Todo) -> catalog_core::Result<Todo> {
        let mut conn = self.session().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO todos (title, description, priority, complete)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.priority)
        .bind(todo.complete)
        .execute(&mut *conn)
        .await
        .map_err(storage_err)?;

        todo.set_id(result.last_insert_rowid());
        Ok(todo)
    }

    async fn update(&self, id: i64, mut todo: Todo) -> catalog_core::Result<Todo> {
        let mut conn = self.session().await?;
        let result = sqlx::query(
            r#"
            UPDATE todos SET title = ?1, description = ?2, priority = ?3, complete = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.priority)
        .bind(todo.complete)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(Todo::KIND, id));
        }

        todo.set_id(id);
        Ok(todo)
    }

    async fn delete(&self, id: i64) -> catalog_core::Result<()> {
        let mut conn = self.session().await?;
        let result = sqlx::query(
            r#"
            DELETE FROM todos WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(Todo::KIND, id));
        }

        Ok(())
    }
}

fn storage_err(e: sqlx::Error) -> CatalogError {
    CatalogError::Storage(e.to_string())
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: String,
    priority: i64,
    complete: bool,
}

impl From<TodoRow> for Todo {
    fn from(r: TodoRow) -> Self {
        Todo {
            id: r.id,
            title: r.title,
            description: r.description,
            priority: r.priority,
            complete: r.complete,
        }
    }
}
