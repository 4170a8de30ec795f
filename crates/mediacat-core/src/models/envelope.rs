//! JSON bodies exchanged over the HTTP API.
//!
//! Shared by the server and the API client so both sides agree on the shape.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{MediaDetail, MediaSummary, StatsReport, SweepReport};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully";
pub const DELETE_SUCCESS_MESSAGE: &str = "Media deleted successfully";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListMeta {
    /// Matching records before the limit was applied
    pub total: usize,
    /// Records in this response
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaListResponse {
    pub data: Vec<MediaSummary>,
    pub meta: ListMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaUploadResponse {
    pub data: MediaSummary,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaDetailResponse {
    pub data: MediaDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub data: StatsReport,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CleanupResponse {
    pub data: SweepReport,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CleanupRequest {
    /// Report orphaned files without deleting them
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
