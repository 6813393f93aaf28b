//! HTTP error responses

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::{CatalogError, FieldError, ValidationError};
use serde_json::json;

/// Handler error, rendered as `{"error", "code"[, "details"]}`
#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            CatalogError::Validation(_) | CatalogError::Serialization(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        ApiError(e)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(CatalogError::Validation(ValidationError::single(FieldError::new(
            "id",
            "type",
            rejection.body_text(),
        ))))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(CatalogError::Serialization(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        let body = match &self.0 {
            CatalogError::Validation(v) => json!({
                "error": "Validation failed",
                "code": self.0.code(),
                "details": v.errors,
            }),
            other => json!({
                "error": other.to_string(),
                "code": other.code(),
            }),
        };
        (status, Json(body)).into_response()
    }
}
