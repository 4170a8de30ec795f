//! Query/reporting facade over the catalog store.

use std::sync::Arc;

use mediacat_core::models::{Caller, ListQuery, MediaRecord, StatsReport};
use mediacat_core::AppError;
use mediacat_db::CatalogStore;
use mediacat_storage::Storage;

/// One page of a filtered listing.
#[derive(Debug, Clone)]
pub struct MediaPage {
    pub items: Vec<MediaRecord>,
    /// Number of matching records before the limit was applied
    pub total: usize,
}

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
    storage: Arc<dyn Storage>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>, storage: Arc<dyn Storage>) -> Self {
        Self { catalog, storage }
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
        &self.catalog
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<MediaPage, AppError> {
        let filter = query.to_filter()?;
        let mut items = self.catalog.list(&filter).await?;
        let total = items.len();

        if let Some(limit) = query.limit {
            items.truncate(limit as usize);
        }

        Ok(MediaPage { items, total })
    }

    #[tracing::instrument(skip(self), fields(media_id = id))]
    pub async fn get(&self, id: i64) -> Result<MediaRecord, AppError> {
        self.catalog
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Media not found".to_string()))
    }

    /// Delete a record and its stored file.
    ///
    /// Returns `false` when the id is unknown. If the stored file cannot be removed the
    /// record is kept and a storage error is returned.
    #[tracing::instrument(skip(self, caller), fields(media_id = id, caller = ?caller.user_id))]
    pub async fn delete(&self, caller: &Caller, id: i64) -> Result<bool, AppError> {
        let record = match self.catalog.get(id).await? {
            Some(record) => record,
            None => return Ok(false),
        };

        self.storage.delete(&record.storage_key).await?;

        let removed = self.catalog.remove(id).await?;
        if removed {
            tracing::info!(
                media_id = id,
                storage_key = %record.storage_key,
                "Media deleted"
            );
        }
        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    pub async fn stats(&self) -> Result<StatsReport, AppError> {
        Ok(StatsReport::from(self.catalog.stats().await?))
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.catalog.count().await
    }
}
