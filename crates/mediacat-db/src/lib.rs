//! Mediacat catalog store
//!
//! The [`CatalogStore`] trait and its two backends: an in-memory store for
//! development and tests, and a Postgres store for deployments.

pub mod catalog;
pub mod setup;

pub use catalog::{CatalogStore, MemoryCatalog, PgCatalog};
pub use setup::{create_catalog, setup_database};
