//! Media catalog methods for the API client.

use crate::{ApiClient, API_PREFIX};
use anyhow::{Context, Result};
use mediacat_core::models::{
    CleanupRequest, CleanupResponse, ListQuery, MediaDetailResponse, MediaListResponse,
    MediaUploadResponse, MessageResponse, StatsResponse,
};
use std::path::Path;

impl ApiClient {
    /// List media with optional collection/type filters and a limit.
    pub async fn list_media(&self, query: &ListQuery) -> Result<MediaListResponse> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(collection) = &query.collection {
            params.push(("collection", collection.clone()));
        }
        if let Some(media_type) = &query.media_type {
            params.push(("type", media_type.clone()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        self.get(&format!("{}/media", API_PREFIX), &params).await
    }

    /// Get a single media record by ID.
    pub async fn get_media(&self, id: i64) -> Result<MediaDetailResponse> {
        self.get(&format!("{}/media/{}", API_PREFIX, id), &[]).await
    }

    /// Upload a local file, optionally into a collection.
    pub async fn upload_media(
        &self,
        file_path: &Path,
        collection: Option<&str>,
    ) -> Result<MediaUploadResponse> {
        if file_path
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(anyhow::anyhow!("Invalid input: {}", file_path.display()));
        }

        let buffer = std::fs::read(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        let filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        let mut form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(buffer).file_name(filename),
        );
        if let Some(collection) = collection {
            form = form.text("collection", collection.to_string());
        }

        self.post_multipart(&format!("{}/media/upload", API_PREFIX), form)
            .await
    }

    /// Delete a media record and its stored file.
    pub async fn delete_media(&self, id: i64) -> Result<MessageResponse> {
        self.delete(&format!("{}/media/{}", API_PREFIX, id)).await
    }

    /// Catalog statistics grouped by collection and MIME type.
    pub async fn media_stats(&self) -> Result<StatsResponse> {
        self.get(&format!("{}/media/stats", API_PREFIX), &[]).await
    }

    /// Find (and unless `dry_run`, remove) stored files with no catalog record.
    pub async fn cleanup_orphans(&self, dry_run: bool) -> Result<CleanupResponse> {
        self.post_json(
            &format!("{}/media/cleanup", API_PREFIX),
            &CleanupRequest { dry_run },
        )
        .await
    }
}
