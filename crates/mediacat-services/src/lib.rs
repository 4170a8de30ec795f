//! Mediacat Services Layer
//!
//! Business services sitting between the HTTP/CLI surfaces and the catalog and
//! blob stores: the ingest path, the query/reporting facade and the orphan sweep.
//! Keep coordination here; keep thin HTTP handling in mediacat-api.

pub mod catalog;
pub mod cleanup;
pub mod in_flight;
pub mod ingest;

pub use catalog::{CatalogService, MediaPage};
pub use cleanup::{OrphanSweeper, StorageOrphanSweeper};
pub use in_flight::InFlightUploads;
pub use ingest::{IngestRequest, IngestService};
pub use mediacat_db::{CatalogStore, MemoryCatalog, PgCatalog};
pub use mediacat_storage::{
    create_storage, LocalStorage, MemoryStorage, Storage, StorageBackend, StorageError,
    StorageResult,
};

#[cfg(test)]
pub(crate) mod test_support;
