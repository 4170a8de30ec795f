use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use mediacat_core::models::{
    CatalogStats, CollectionStats, MediaFilter, MediaRecord, MimeTypeStats, NewMediaRecord,
};
use mediacat_core::AppError;
use tokio::sync::RwLock;

use super::CatalogStore;

#[derive(Default)]
struct Inner {
    records: BTreeMap<i64, MediaRecord>,
    next_id: i64,
    total_size_bytes: i64,
}

/// In-process catalog.
///
/// All mutations happen under one write lock, together with the cached totals, so
/// readers see either the state before or after an insert/remove and never a mix.
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<Inner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select"))]
    async fn list(&self, filter: &MediaFilter) -> Result<Vec<MediaRecord>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select", db.record_id = id))]
    async fn get(&self, id: i64) -> Result<Option<MediaRecord>, AppError> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "media", db.operation = "insert"))]
    async fn insert(&self, record: NewMediaRecord) -> Result<MediaRecord, AppError> {
        if record.size_bytes < 0 {
            return Err(AppError::InvalidInput(
                "File size cannot be negative".to_string(),
            ));
        }
        if record.collection_name.is_empty() {
            return Err(AppError::InvalidInput(
                "Collection name cannot be empty".to_string(),
            ));
        }

        let mut inner = self.inner.write().await;
        if inner.records.values().any(|r| r.uuid == record.uuid) {
            return Err(AppError::Internal(format!(
                "Media with uuid {} already exists",
                record.uuid
            )));
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let record = record.into_record(id, Utc::now());
        inner.total_size_bytes += record.size_bytes;
        inner.records.insert(id, record.clone());

        tracing::debug!(media_id = id, "Media record inserted");
        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "delete", db.record_id = id))]
    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        match inner.records.remove(&id) {
            Some(record) => {
                inner.total_size_bytes -= record.size_bytes;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.records.len() as i64)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "aggregate"))]
    async fn stats(&self) -> Result<CatalogStats, AppError> {
        let inner = self.inner.read().await;

        let mut by_collection: Vec<CollectionStats> = Vec::new();
        let mut collection_index: HashMap<&str, usize> = HashMap::new();
        let mut by_mime_type: Vec<MimeTypeStats> = Vec::new();
        let mut mime_index: HashMap<&str, usize> = HashMap::new();

        for record in inner.records.values() {
            let idx = *collection_index
                .entry(record.collection_name.as_str())
                .or_insert_with(|| {
                    by_collection.push(CollectionStats {
                        collection_name: record.collection_name.clone(),
                        count: 0,
                        total_size_bytes: 0,
                    });
                    by_collection.len() - 1
                });
            by_collection[idx].count += 1;
            by_collection[idx].total_size_bytes += record.size_bytes;

            let idx = *mime_index
                .entry(record.mime_type.as_str())
                .or_insert_with(|| {
                    by_mime_type.push(MimeTypeStats {
                        mime_type: record.mime_type.clone(),
                        count: 0,
                    });
                    by_mime_type.len() - 1
                });
            by_mime_type[idx].count += 1;
        }

        Ok(CatalogStats {
            total_count: inner.records.len() as i64,
            total_size_bytes: inner.total_size_bytes,
            by_collection,
            by_mime_type,
        })
    }

    async fn storage_keys(&self) -> Result<HashSet<String>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .values()
            .map(|record| record.storage_key.clone())
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
