//! Validated access to one record collection

use catalog_core::{
    validate, CatalogError, FieldError, Filter, Record, RecordStore, Result, ValidationError,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Validates requests for one record kind before they reach its store
pub struct Catalog<R: Record> {
    store: Arc<dyn RecordStore<R>>,
}

impl<R: Record> Clone for Catalog<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<R: Record> Catalog<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>) -> Self {
        Self { store }
    }

    /// Full scan, or a filtered scan when query parameters are given
    pub async fn list(&self, params: &[(String, String)]) -> Result<Vec<R>> {
        if params.is_empty() {
            return self.store.list_all().await;
        }

        let filter = Filter::parse(R::schema(), params)?;
        debug!("Filtering {} records by {:?}", R::KIND, filter.predicates);
        self.store.filter(&filter).await
    }

    pub async fn get(&self, id: i64) -> Result<R> {
        check_path_id(id)?;
        self.store.get_by_id(id).await
    }

    pub async fn create(&self, payload: Value) -> Result<R> {
        let record = decode::<R>(payload)?;
        let created = self.store.insert(record).await?;
        info!("Created {} {}", R::KIND, created.id());
        Ok(created)
    }

    /// Full replacement of the record named by `id`, or by the payload's own
    /// `id` when no path id is given. A payload without any id matches nothing.
    pub async fn replace(&self, id: Option<i64>, payload: Value) -> Result<R> {
        if let Some(id) = id {
            check_path_id(id)?;
        }
        let target = id.or_else(|| payload.get("id").and_then(Value::as_i64));
        let record = decode::<R>(payload)?;
        let Some(target) = target else {
            return Err(CatalogError::not_found(R::KIND, 0));
        };

        let updated = self.store.update(target, record).await?;
        info!("Updated {} {}", R::KIND, target);
        Ok(updated)
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        check_path_id(id)?;
        self.store.delete(id).await?;
        info!("Deleted {} {}", R::KIND, id);
        Ok(())
    }
}

/// Validate, then deserialize. Nothing is stored if either step fails.
fn decode<R: Record>(payload: Value) -> Result<R> {
    validate(R::schema(), &payload)?;
    Ok(serde_json::from_value(payload)?)
}

fn check_path_id(id: i64) -> std::result::Result<(), ValidationError> {
    if id > 0 {
        Ok(())
    } else {
        Err(ValidationError::single(FieldError::new(
            "id",
            "too_small",
            "should be greater than 0",
        )))
    }
}
