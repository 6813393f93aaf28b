//! Storage trait for record collections

use crate::filter::Filter;
use crate::record::Record;
use crate::Result;
use async_trait::async_trait;

/// A collection of records keyed by integer id.
///
/// Lookups, updates and deletes of an absent id return
/// [`CatalogError::NotFound`](crate::CatalogError::NotFound) and leave the
/// collection unchanged.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Every record, in insertion order
    async fn list_all(&self) -> Result<Vec<R>>;

    async fn get_by_id(&self, id: i64) -> Result<R>;

    /// Records satisfying every predicate of `filter`, in insertion order
    async fn filter(&self, filter: &Filter) -> Result<Vec<R>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect())
    }

    /// Store `record` under id = max existing id + 1 (1 when empty)
    async fn insert(&self, record: R) -> Result<R>;

    /// Replace every field of record `id`; the id itself is kept
    async fn update(&self, id: i64, record: R) -> Result<R>;

    async fn delete(&self, id: i64) -> Result<()>;
}
