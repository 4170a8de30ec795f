//! Mediacat Storage Library
//!
//! Blob storage abstraction for uploaded media: the [`Storage`] trait plus a local
//! filesystem backend and an in-memory backend.
//!
//! # Storage key format
//!
//! Every uploaded file lives at `media/{uuid}/{file_name}`, where `uuid` is the media
//! record's external identifier. Keys must not contain `..` or a leading `/`. Key
//! generation is centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::media_storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use mediacat_core::StorageBackend;
pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult};
