//! Application state shared by all handlers.

use std::sync::Arc;

use mediacat_core::Config;
use mediacat_services::{
    CatalogService, CatalogStore, IngestService, OrphanSweeper, Storage, StorageOrphanSweeper,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogService,
    pub ingest: IngestService,
    pub sweeper: Arc<dyn OrphanSweeper>,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    /// Wire the services around one catalog store and one blob store.
    pub fn new(config: Config, store: Arc<dyn CatalogStore>, storage: Arc<dyn Storage>) -> Self {
        let ingest = IngestService::new(store.clone(), storage.clone())
            .with_max_upload_bytes(config.max_upload_bytes());
        let sweeper: Arc<dyn OrphanSweeper> = Arc::new(StorageOrphanSweeper::new(
            store.clone(),
            storage.clone(),
            ingest.in_flight().clone(),
        ));

        AppState {
            catalog: CatalogService::new(store, storage.clone()),
            ingest,
            sweeper,
            storage,
            config,
        }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        self.catalog.catalog()
    }
}
