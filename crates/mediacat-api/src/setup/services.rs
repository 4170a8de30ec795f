//! Catalog and storage wiring

use std::sync::Arc;

use anyhow::{Context, Result};
use mediacat_core::Config;
use mediacat_db::create_catalog;
use mediacat_storage::create_storage;

use crate::state::AppState;

/// Open the configured catalog and blob store and build the shared state.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let catalog = create_catalog(config)
        .await
        .context("Failed to initialize media catalog")?;

    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(backend = %storage.backend_type(), "Storage initialized");

    Ok(Arc::new(AppState::new(config.clone(), catalog, storage)))
}
