//! Orphaned file cleanup.

use std::sync::Arc;

use async_trait::async_trait;
use mediacat_core::constants::MEDIA_KEY_PREFIX;
use mediacat_core::models::SweepReport;
use mediacat_core::AppError;
use mediacat_db::CatalogStore;
use mediacat_storage::Storage;

use crate::in_flight::InFlightUploads;

/// Removes stored files that no catalog record points at.
#[async_trait]
pub trait OrphanSweeper: Send + Sync {
    /// Find orphaned files and, unless `dry_run`, delete them.
    async fn sweep_orphans(&self, dry_run: bool) -> Result<SweepReport, AppError>;
}

/// Sweeper that compares the blob store's media keys with the catalog's keys.
///
/// Keys of uploads still in flight are never treated as orphaned; pass the set from
/// [`IngestService::in_flight`](crate::IngestService::in_flight).
#[derive(Clone)]
pub struct StorageOrphanSweeper {
    catalog: Arc<dyn CatalogStore>,
    storage: Arc<dyn Storage>,
    in_flight: InFlightUploads,
}

impl StorageOrphanSweeper {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        storage: Arc<dyn Storage>,
        in_flight: InFlightUploads,
    ) -> Self {
        Self {
            catalog,
            storage,
            in_flight,
        }
    }
}

#[async_trait]
impl OrphanSweeper for StorageOrphanSweeper {
    #[tracing::instrument(skip(self), fields(cleanup.operation = "orphans"))]
    async fn sweep_orphans(&self, dry_run: bool) -> Result<SweepReport, AppError> {
        // Order matters: storage, then in-flight keys, then the catalog. Ingest marks a
        // key in flight before writing it and clears it only after the record commits,
        // so every listed key is either in the snapshot or visible in the catalog read.
        let stored_keys = self.storage.list_keys(MEDIA_KEY_PREFIX).await?;
        let in_flight = self.in_flight.snapshot();
        let known_keys = self.catalog.storage_keys().await?;

        let orphaned_keys: Vec<String> = stored_keys
            .into_iter()
            .filter(|key| !known_keys.contains(key) && !in_flight.contains(key))
            .collect();

        let mut report = SweepReport {
            dry_run,
            orphaned_keys,
            ..Default::default()
        };

        if dry_run {
            tracing::info!(
                orphaned = report.orphaned_keys.len(),
                in_flight = in_flight.len(),
                "Dry run: orphaned files left in place"
            );
            return Ok(report);
        }

        for key in &report.orphaned_keys {
            match self.storage.delete(key).await {
                Ok(()) => report.removed_keys.push(key.clone()),
                Err(e) => {
                    tracing::warn!(error = %e, storage_key = %key, "Failed to delete orphaned file");
                    report.failed_keys.push(key.clone());
                }
            }
        }

        tracing::info!(
            orphaned = report.orphaned_keys.len(),
            removed = report.removed_keys.len(),
            failed = report.failed_keys.len(),
            in_flight = in_flight.len(),
            "Orphan cleanup completed"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{IngestRequest, IngestService};
    use crate::test_support::{FailingDeleteStorage, GatedInsertCatalog};
    use mediacat_core::models::Caller;
    use mediacat_db::MemoryCatalog;
    use mediacat_storage::{LocalStorage, MemoryStorage};

    async fn ingest_one(ingest: &IngestService, name: &str) -> String {
        ingest
            .ingest(
                &Caller::anonymous(),
                IngestRequest {
                    data: b"content".to_vec(),
                    declared_file_name: name.to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .storage_key
    }

    #[tokio::test]
    async fn removes_only_unreferenced_media_keys() {
        let catalog: Arc<dyn CatalogStore> = Arc::new(MemoryCatalog::new());
        let storage = Arc::new(MemoryStorage::default());
        let ingest = IngestService::new(catalog.clone(), storage.clone());
        let sweeper =
            StorageOrphanSweeper::new(catalog, storage.clone(), ingest.in_flight().clone());

        let kept = ingest_one(&ingest, "kept.png").await;
        storage
            .upload_with_key("media/stray/orphan.png", b"x".to_vec(), "image/png")
            .await
            .unwrap();
        storage
            .upload_with_key("exports/report.csv", b"x".to_vec(), "text/csv")
            .await
            .unwrap();

        let report = sweeper.sweep_orphans(false).await.unwrap();
        assert!(!report.dry_run);
        assert_eq!(report.orphaned_keys, vec!["media/stray/orphan.png"]);
        assert_eq!(report.removed_keys, vec!["media/stray/orphan.png"]);
        assert!(report.failed_keys.is_empty());

        assert!(storage.exists(&kept).await.unwrap());
        assert!(!storage.exists("media/stray/orphan.png").await.unwrap());
        assert!(storage.exists("exports/report.csv").await.unwrap());

        // nothing left to do on a second pass
        let again = sweeper.sweep_orphans(false).await.unwrap();
        assert!(again.orphaned_keys.is_empty());
    }

    #[tokio::test]
    async fn dry_run_removes_nothing() {
        let catalog: Arc<dyn CatalogStore> = Arc::new(MemoryCatalog::new());
        let storage = Arc::new(MemoryStorage::default());
        let sweeper = StorageOrphanSweeper::new(catalog, storage.clone(), InFlightUploads::new());

        storage
            .upload_with_key("media/stray/a.txt", b"x".to_vec(), "text/plain")
            .await
            .unwrap();

        let report = sweeper.sweep_orphans(true).await.unwrap();
        assert!(report.dry_run);
        assert_eq!(report.orphaned_keys.len(), 1);
        assert!(report.removed_keys.is_empty());
        assert!(storage.exists("media/stray/a.txt").await.unwrap());
    }

    #[tokio::test]
    async fn failed_deletes_are_reported() {
        let catalog: Arc<dyn CatalogStore> = Arc::new(MemoryCatalog::new());
        let storage = Arc::new(FailingDeleteStorage::default());
        storage
            .upload_with_key("media/stray/a.txt", b"x".to_vec(), "text/plain")
            .await
            .unwrap();

        let report = StorageOrphanSweeper::new(catalog, storage, InFlightUploads::new())
            .sweep_orphans(false)
            .await
            .unwrap();
        assert_eq!(report.failed_keys, vec!["media/stray/a.txt"]);
        assert!(report.removed_keys.is_empty());
    }

    #[tokio::test]
    async fn sweeps_local_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(
            LocalStorage::new(dir.path(), "http://localhost:3000/files".to_string())
                .await
                .unwrap(),
        );
        let catalog: Arc<dyn CatalogStore> = Arc::new(MemoryCatalog::new());
        let ingest = IngestService::new(catalog.clone(), storage.clone());

        let kept = ingest_one(&ingest, "kept.txt").await;
        std::fs::create_dir_all(dir.path().join("media/lost")).unwrap();
        std::fs::write(dir.path().join("media/lost/file.txt"), b"lost").unwrap();

        let report = StorageOrphanSweeper::new(catalog, storage.clone(), ingest.in_flight().clone())
            .sweep_orphans(false)
            .await
            .unwrap();
        assert_eq!(report.removed_keys, vec!["media/lost/file.txt"]);
        assert!(storage.exists(&kept).await.unwrap());
        assert!(!dir.path().join("media/lost/file.txt").exists());
    }

    #[tokio::test]
    async fn upload_awaiting_its_record_is_not_swept() {
        let catalog = Arc::new(GatedInsertCatalog::default());
        let storage = Arc::new(MemoryStorage::default());
        let ingest = IngestService::new(catalog.clone(), storage.clone());
        let sweeper =
            StorageOrphanSweeper::new(catalog.clone(), storage.clone(), ingest.in_flight().clone());

        let upload = tokio::spawn({
            let ingest = ingest.clone();
            async move {
                let caller = Caller::anonymous();
                ingest
                    .ingest(
                        &caller,
                        IngestRequest {
                            data: b"content".to_vec(),
                            declared_file_name: "a.txt".to_string(),
                            ..Default::default()
                        },
                    )
                    .await
            }
        });

        // bytes are stored, record insert is parked
        catalog.insert_started.notified().await;
        assert_eq!(storage.len().await, 1);

        let report = sweeper.sweep_orphans(false).await.unwrap();
        assert!(report.orphaned_keys.is_empty());
        assert!(report.removed_keys.is_empty());

        catalog.release_insert.notify_one();
        let record = upload.await.unwrap().unwrap();
        assert!(storage.exists(&record.storage_key).await.unwrap());
        assert!(!ingest.in_flight().contains(&record.storage_key));

        let again = sweeper.sweep_orphans(false).await.unwrap();
        assert!(again.orphaned_keys.is_empty());
        assert!(storage.exists(&record.storage_key).await.unwrap());
    }
}
