use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use crate::format::format_size;

/// A catalogued media file.
///
/// `id`, `uuid` and `created_at` are fixed when the record is inserted and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MediaRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub collection_name: String,
    pub custom_properties: JsonValue,
    pub storage_key: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Everything the catalog needs to create a record; it assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewMediaRecord {
    pub uuid: Uuid,
    pub name: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub collection_name: String,
    pub custom_properties: JsonValue,
    pub storage_key: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub uploaded_by: Option<Uuid>,
}

impl NewMediaRecord {
    pub fn into_record(self, id: i64, created_at: DateTime<Utc>) -> MediaRecord {
        MediaRecord {
            id,
            uuid: self.uuid,
            name: self.name,
            file_name: self.file_name,
            mime_type: self.mime_type,
            size_bytes: self.size_bytes,
            collection_name: self.collection_name,
            custom_properties: self.custom_properties,
            storage_key: self.storage_key,
            url: self.url,
            thumbnail_url: self.thumbnail_url,
            uploaded_by: self.uploaded_by,
            created_at,
        }
    }
}

/// Media summary as returned by listings and uploads.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaSummary {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub file_name: String,
    pub url: String,
    /// Thumbnail URL, or the file URL itself when no thumbnail exists
    pub thumb_url: String,
    pub mime_type: String,
    /// Size in bytes
    pub size: i64,
    #[schema(example = "1.50 MB")]
    pub size_formatted: String,
    pub collection_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&MediaRecord> for MediaSummary {
    fn from(record: &MediaRecord) -> Self {
        MediaSummary {
            id: record.id,
            uuid: record.uuid,
            name: record.name.clone(),
            file_name: record.file_name.clone(),
            url: record.url.clone(),
            thumb_url: record
                .thumbnail_url
                .clone()
                .unwrap_or_else(|| record.url.clone()),
            mime_type: record.mime_type.clone(),
            size: record.size_bytes,
            size_formatted: format_size(record.size_bytes),
            collection_name: record.collection_name.clone(),
            created_at: record.created_at,
        }
    }
}

/// Single-media response: the summary plus custom properties.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaDetail {
    #[serde(flatten)]
    pub summary: MediaSummary,
    #[schema(value_type = Object)]
    pub custom_properties: JsonValue,
}

impl From<&MediaRecord> for MediaDetail {
    fn from(record: &MediaRecord) -> Self {
        MediaDetail {
            summary: MediaSummary::from(record),
            custom_properties: record.custom_properties.clone(),
        }
    }
}

/// How a caller proved who they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Authentication is disabled
    Anonymous,
    ApiKey,
}

/// Identity of whoever is calling into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<Uuid>,
    pub auth_method: AuthMethod,
}

impl Caller {
    pub fn anonymous() -> Self {
        Caller {
            user_id: None,
            auth_method: AuthMethod::Anonymous,
        }
    }

    pub fn api_key(user_id: Option<Uuid>) -> Self {
        Caller {
            user_id,
            auth_method: AuthMethod::ApiKey,
        }
    }
}
