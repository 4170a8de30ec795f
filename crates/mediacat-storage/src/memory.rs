use crate::keys::is_safe_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-process blob store. Contents are lost when the process exits.
pub struct MemoryStorage {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
    base_url: String,
}

impl MemoryStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        MemoryStorage {
            objects: RwLock::new(BTreeMap::new()),
            base_url: base_url.into(),
        }
    }

    /// Number of stored objects
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    fn check_key(storage_key: &str) -> StorageResult<()> {
        if is_safe_key(storage_key) {
            Ok(())
        } else {
            Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        MemoryStorage::new("memory://")
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        Self::check_key(storage_key)?;
        let size = data.len();
        self.objects
            .write()
            .await
            .insert(storage_key.to_string(), data);

        tracing::debug!(key = %storage_key, size_bytes = size, "Memory storage upload");
        Ok(self.public_url(storage_key))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        Self::check_key(storage_key)?;
        self.objects
            .read()
            .await
            .get(storage_key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        Self::check_key(storage_key)?;
        self.objects.write().await.remove(storage_key);
        tracing::debug!(key = %storage_key, "Memory storage delete");
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Self::check_key(storage_key)?;
        Ok(self.objects.read().await.contains_key(storage_key))
    }

    async fn list_keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Ok(self
            .objects
            .read()
            .await
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
