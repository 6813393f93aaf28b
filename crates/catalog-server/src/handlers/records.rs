//! CRUD handlers shared by every record collection

use crate::error::ApiError;
use crate::services::Catalog;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_core::Record;
use serde_json::Value;

/// Routes for one collection mounted at `base` (e.g. `/books`):
///
/// - `GET    {base}`          list, or filter with `?field=value`
/// - `POST   {base}`          create, 201
/// - `PUT    {base}`          replace the record named by the body's `id`, 204
/// - `GET    {base}/:id`      fetch one
/// - `PUT    {base}/:id`      replace, 204
/// - `DELETE {base}/:id`      delete, 204
///
/// Malformed path ids and bodies are answered through [`ApiError`], so they
/// get the same JSON error body as every other rejected request.
pub fn routes<R: Record>(base: &str, catalog: Catalog<R>) -> Router {
    Router::new()
        .route(base, get(list::<R>).post(create::<R>).put(replace::<R>))
        .route(
            &format!("{}/:id", base),
            get(get_one::<R>).put(replace_at::<R>).delete(remove::<R>),
        )
        .with_state(catalog)
}

async fn list<R: Record>(
    State(catalog): State<Catalog<R>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<R>>, ApiError> {
    Ok(Json(catalog.list(&params).await?))
}

async fn get_one<R: Record>(
    State(catalog): State<Catalog<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<R>, ApiError> {
    let Path(id) = path?;
    Ok(Json(catalog.get(id).await?))
}

async fn create<R: Record>(
    State(catalog): State<Catalog<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    let Json(payload) = body?;
    let created = catalog.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn replace<R: Record>(
    State(catalog): State<Catalog<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = body?;
    catalog.replace(None, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn replace_at<R: Record>(
    State(catalog): State<Catalog<R>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    let Json(payload) = body?;
    catalog.replace(Some(id), payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove<R: Record>(
    State(catalog): State<Catalog<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    catalog.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
