//! Shared key generation for storage backends.
//!
//! Key format: `media/{uuid}/{file_name}`.

use mediacat_core::constants::MEDIA_KEY_PREFIX;
use uuid::Uuid;

/// Generate the storage key for a media file.
pub fn media_storage_key(media_uuid: Uuid, file_name: &str) -> String {
    format!("{}{}/{}", MEDIA_KEY_PREFIX, media_uuid, file_name)
}

/// Reject keys that could escape the storage root: absolute keys, `..` components and
/// empty components. Dots inside a component (`release..notes.pdf`) are fine.
pub(crate) fn is_safe_key(storage_key: &str) -> bool {
    !storage_key.is_empty()
        && !storage_key.starts_with('/')
        && !storage_key.split('/').any(|c| c == ".." || c.is_empty())
}
