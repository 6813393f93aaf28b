//! In-memory record collection

use async_trait::async_trait;
use catalog_core::{CatalogError, Filter, Record, RecordStore, Result};
use tokio::sync::RwLock;

/// Insertion-ordered collection guarded by a single lock.
///
/// Every operation holds the lock for its whole duration, so id assignment
/// and append happen together.
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Start from existing records, keeping their ids
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn list_all(&self) -> Result<Vec<R>> {
        Ok(self.records.read().await.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<R> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(R::KIND, id))
    }

    async fn filter(&self, filter: &Filter) -> Result<Vec<R>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(*r))
            .cloned()
            .collect())
    }

    async fn insert(&self, mut record: R) -> Result<R> {
        let mut records = self.records.write().await;
        let next_id = records.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        record.set_id(next_id);
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, mut record: R) -> Result<R> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| CatalogError::not_found(R::KIND, id))?;
        record.set_id(id);
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| CatalogError::not_found(R::KIND, id))?;
        records.remove(index);
        Ok(())
    }
}
