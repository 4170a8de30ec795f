//! Test doubles for failure paths.

use std::collections::HashSet;

use async_trait::async_trait;
use mediacat_core::models::{CatalogStats, MediaFilter, MediaRecord, NewMediaRecord};
use mediacat_core::AppError;
use mediacat_db::{CatalogStore, MemoryCatalog};
use mediacat_storage::{MemoryStorage, Storage, StorageBackend, StorageError, StorageResult};
use tokio::sync::Notify;

/// Catalog whose inserts always fail.
#[derive(Default)]
pub struct FailingInsertCatalog {
    inner: MemoryCatalog,
}

#[async_trait]
impl CatalogStore for FailingInsertCatalog {
    async fn list(&self, filter: &MediaFilter) -> Result<Vec<MediaRecord>, AppError> {
        self.inner.list(filter).await
    }

    async fn get(&self, id: i64) -> Result<Option<MediaRecord>, AppError> {
        self.inner.get(id).await
    }

    async fn insert(&self, _record: NewMediaRecord) -> Result<MediaRecord, AppError> {
        Err(AppError::Internal("catalog unavailable".to_string()))
    }

    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        self.inner.remove(id).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.inner.count().await
    }

    async fn stats(&self) -> Result<CatalogStats, AppError> {
        self.inner.stats().await
    }

    async fn storage_keys(&self) -> Result<HashSet<String>, AppError> {
        self.inner.storage_keys().await
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Catalog whose inserts park until `release_insert` is notified.
#[derive(Default)]
pub struct GatedInsertCatalog {
    inner: MemoryCatalog,
    pub insert_started: Notify,
    pub release_insert: Notify,
}

#[async_trait]
impl CatalogStore for GatedInsertCatalog {
    async fn list(&self, filter: &MediaFilter) -> Result<Vec<MediaRecord>, AppError> {
        self.inner.list(filter).await
    }

    async fn get(&self, id: i64) -> Result<Option<MediaRecord>, AppError> {
        self.inner.get(id).await
    }

    async fn insert(&self, record: NewMediaRecord) -> Result<MediaRecord, AppError> {
        self.insert_started.notify_one();
        self.release_insert.notified().await;
        self.inner.insert(record).await
    }

    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        self.inner.remove(id).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.inner.count().await
    }

    async fn stats(&self) -> Result<CatalogStats, AppError> {
        self.inner.stats().await
    }

    async fn storage_keys(&self) -> Result<HashSet<String>, AppError> {
        self.inner.storage_keys().await
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "gated"
    }
}

/// Storage whose deletes always fail.
#[derive(Default)]
pub struct FailingDeleteStorage {
    pub inner: MemoryStorage,
}

#[async_trait]
impl Storage for FailingDeleteStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        self.inner.upload_with_key(storage_key, data, content_type).await
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.inner.download(storage_key).await
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        Err(StorageError::DeleteFailed(format!(
            "permission denied: {}",
            storage_key
        )))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.inner.exists(storage_key).await
    }

    async fn list_keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        self.inner.list_keys(prefix).await
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.inner.public_url(storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
