//! Configuration module
//!
//! Server configuration is read from environment variables (and a `.env` file when
//! present). Every value has a development default except `DATABASE_URL`, which is
//! only required when the Postgres catalog is selected.

use std::env;

use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;
use crate::storage_types::{CatalogBackend, StorageBackend};

const SERVER_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOCAL_STORAGE_PATH: &str = "./storage/media";
const DEFAULT_LOCAL_STORAGE_BASE_URL: &str = "http://localhost:3000/files";

/// Settings shared by every process that serves HTTP.
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

/// Media catalog service configuration
#[derive(Clone, Debug)]
pub struct CatalogServiceConfig {
    pub base: BaseConfig,
    pub catalog_backend: CatalogBackend,
    pub database_url: Option<String>,
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    pub max_upload_bytes: usize,
    /// Shared API key; `None` disables authentication.
    pub api_key: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<CatalogServiceConfig>);

impl Config {
    fn as_catalog(&self) -> &CatalogServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_environment(&self.as_catalog().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = CatalogServiceConfig::from_lookup(|key| env::var(key).ok())?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_catalog().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_catalog().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_catalog().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_catalog().base.environment
    }

    pub fn log_json(&self) -> bool {
        self.as_catalog().base.log_json
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_catalog().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_catalog().base.db_timeout_seconds
    }

    pub fn catalog_backend(&self) -> CatalogBackend {
        self.as_catalog().catalog_backend
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_catalog().database_url.as_deref()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_catalog().storage_backend
    }

    pub fn local_storage_path(&self) -> &str {
        &self.as_catalog().local_storage_path
    }

    pub fn local_storage_base_url(&self) -> &str {
        &self.as_catalog().local_storage_base_url
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.as_catalog().max_upload_bytes
    }

    pub fn api_key(&self) -> Option<&str> {
        self.as_catalog().api_key.as_deref()
    }
}

fn is_production_environment(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

impl CatalogServiceConfig {
    /// Build the configuration from an arbitrary variable source.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(get: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = get("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: get("SERVER_PORT")
                .or_else(|| get("PORT"))
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid number"))?,
            cors_origins,
            environment,
            db_max_connections: get("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: get("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            log_json: get("LOG_FORMAT")
                .map(|f| f.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        let catalog_backend = match get("CATALOG_BACKEND") {
            Some(value) => value.parse()?,
            None => CatalogBackend::Memory,
        };

        let storage_backend = match get("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Local,
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a valid number"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(CatalogServiceConfig {
            base,
            catalog_backend,
            database_url: get("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            storage_backend,
            local_storage_path: get("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
            local_storage_base_url: get("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LOCAL_STORAGE_BASE_URL.to_string()),
            max_upload_bytes,
            api_key: get("MEDIACAT_API_KEY").filter(|s| !s.trim().is_empty()),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }

        if self.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_BYTES must be greater than 0"));
        }

        if self.catalog_backend == CatalogBackend::Postgres {
            match self.database_url.as_deref() {
                None => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be set when CATALOG_BACKEND=postgres"
                    ))
                }
                Some(url)
                    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") =>
                {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ))
                }
                Some(_) => {}
            }
        }

        if self.base.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be greater than 0"));
        }

        if is_production_environment(&self.base.environment) {
            if self.api_key.is_none() {
                return Err(anyhow::anyhow!(
                    "MEDIACAT_API_KEY must be set in production"
                ));
            }
            if self.base.cors_origins.iter().any(|o| o == "*") {
                return Err(anyhow::anyhow!(
                    "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
                ));
            }
        }

        Ok(())
    }
}
