//! Shared constants for the media catalog.

/// Collection used when an upload names none (or a blank one).
pub const DEFAULT_COLLECTION: &str = "default";

/// Default maximum upload size: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Maximum length of a collection name.
pub const MAX_COLLECTION_NAME_LENGTH: usize = 255;

/// Prefix under which every stored media object lives.
pub const MEDIA_KEY_PREFIX: &str = "media/";

/// Fallback MIME type when neither the client nor the extension tells us.
pub const OCTET_STREAM: &str = "application/octet-stream";
