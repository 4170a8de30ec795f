//! Catalog store abstraction
//!
//! Both backends return records in insertion (id) order and group statistics by
//! first appearance, so callers never depend on which one is configured.

mod memory;
mod postgres;

use std::collections::HashSet;

use async_trait::async_trait;
use mediacat_core::models::{CatalogStats, MediaFilter, MediaRecord, NewMediaRecord};
use mediacat_core::AppError;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

/// Durable bookkeeping of media records.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Records matching every supplied filter field, in id order.
    async fn list(&self, filter: &MediaFilter) -> Result<Vec<MediaRecord>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<MediaRecord>, AppError>;

    /// Store a new record, assigning its `id` and `created_at`.
    async fn insert(&self, record: NewMediaRecord) -> Result<MediaRecord, AppError>;

    /// Remove a record. Returns `false` when no record had this id.
    async fn remove(&self, id: i64) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    async fn stats(&self) -> Result<CatalogStats, AppError>;

    /// Storage keys of every catalogued record.
    async fn storage_keys(&self) -> Result<HashSet<String>, AppError>;

    /// Cheap liveness probe for health checks.
    async fn ping(&self) -> Result<(), AppError>;

    fn backend_name(&self) -> &'static str;
}
