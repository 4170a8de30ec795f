//! Mediacat Core Library
//!
//! Domain models, error types, configuration and upload validation shared by
//! every Mediacat component.

pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, CatalogServiceConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use format::{format_bytes, format_size};
pub use storage_types::{CatalogBackend, StorageBackend};
