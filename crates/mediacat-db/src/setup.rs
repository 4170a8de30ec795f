//! Catalog setup and initialization

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use mediacat_core::{CatalogBackend, Config};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::catalog::{CatalogStore, MemoryCatalog, PgCatalog};

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url()
        .context("DATABASE_URL must be set for the postgres catalog")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database connected successfully"
    );

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Create the configured catalog backend
pub async fn create_catalog(config: &Config) -> Result<Arc<dyn CatalogStore>> {
    let catalog: Arc<dyn CatalogStore> = match config.catalog_backend() {
        CatalogBackend::Memory => {
            tracing::warn!("Using in-memory catalog; records are lost on restart");
            Arc::new(MemoryCatalog::new())
        }
        CatalogBackend::Postgres => Arc::new(PgCatalog::new(setup_database(config).await?)),
    };

    tracing::info!(backend = catalog.backend_name(), "Catalog store initialized");
    Ok(catalog)
}
