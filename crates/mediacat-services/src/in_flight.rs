//! Storage keys of uploads whose bytes are written but whose record is not yet committed.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared set of in-flight upload keys.
///
/// Held by [`IngestService`](crate::IngestService) while it stores and records a file,
/// and read by the orphan sweep so a file is never swept before its record lands.
#[derive(Clone, Default)]
pub struct InFlightUploads {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlightUploads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `storage_key` as in flight until the returned guard is dropped.
    pub(crate) fn track(&self, storage_key: &str) -> InFlightGuard {
        self.lock().insert(storage_key.to_string());
        InFlightGuard {
            uploads: self.clone(),
            storage_key: storage_key.to_string(),
        }
    }

    pub fn contains(&self, storage_key: &str) -> bool {
        self.lock().contains(storage_key)
    }

    pub fn snapshot(&self) -> HashSet<String> {
        self.lock().clone()
    }

    // The set stays consistent even if a holder panicked, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes its key from the in-flight set on drop, including when an ingest is cancelled.
pub(crate) struct InFlightGuard {
    uploads: InFlightUploads,
    storage_key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.uploads.lock().remove(&self.storage_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_releases_key_on_drop() {
        let uploads = InFlightUploads::new();
        let guard = uploads.track("media/a/file.txt");
        assert!(uploads.contains("media/a/file.txt"));
        assert_eq!(uploads.snapshot().len(), 1);

        drop(guard);
        assert!(!uploads.contains("media/a/file.txt"));
        assert!(uploads.snapshot().is_empty());
    }

    #[test]
    fn clones_share_one_set() {
        let uploads = InFlightUploads::new();
        let other = uploads.clone();
        let _guard = uploads.track("media/b/file.txt");
        assert!(other.contains("media/b/file.txt"));
    }
}
