use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::media::MediaRecord;
use crate::error::AppError;

/// Coarse media type used for filtering by MIME prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaTypeFamily {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaTypeFamily {
    pub fn mime_prefix(&self) -> &'static str {
        match self {
            MediaTypeFamily::Image => "image/",
            MediaTypeFamily::Video => "video/",
            MediaTypeFamily::Audio => "audio/",
            MediaTypeFamily::Document => "application/",
        }
    }
}

impl FromStr for MediaTypeFamily {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(MediaTypeFamily::Image),
            "video" => Ok(MediaTypeFamily::Video),
            "audio" => Ok(MediaTypeFamily::Audio),
            "document" => Ok(MediaTypeFamily::Document),
            other => Err(AppError::InvalidInput(format!(
                "Unknown media type '{}'. Expected one of: image, video, audio, document",
                other
            ))),
        }
    }
}

impl Display for MediaTypeFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaTypeFamily::Image => write!(f, "image"),
            MediaTypeFamily::Video => write!(f, "video"),
            MediaTypeFamily::Audio => write!(f, "audio"),
            MediaTypeFamily::Document => write!(f, "document"),
        }
    }
}

/// Conjunctive catalog filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFilter {
    /// Exact collection name
    pub collection_name: Option<String>,
    /// MIME type prefix, e.g. `image/`
    pub mime_type_prefix: Option<String>,
}

impl MediaFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection_name = Some(collection.into());
        self
    }

    pub fn with_type(mut self, family: MediaTypeFamily) -> Self {
        self.mime_type_prefix = Some(family.mime_prefix().to_string());
        self
    }

    pub fn matches(&self, record: &MediaRecord) -> bool {
        if let Some(collection) = &self.collection_name {
            if &record.collection_name != collection {
                return false;
            }
        }
        if let Some(prefix) = &self.mime_type_prefix {
            if !record.mime_type.starts_with(prefix.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Listing parameters as accepted from HTTP query strings and the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, utoipa::IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Only media in this collection
    pub collection: Option<String>,

    /// Media type family: image, video, audio or document
    #[serde(rename = "type")]
    #[param(example = "image")]
    pub media_type: Option<String>,

    /// Maximum number of records to return
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    #[param(minimum = 1, example = 20)]
    pub limit: Option<i64>,
}

impl ListQuery {
    /// Validate the query and turn it into a catalog filter.
    pub fn to_filter(&self) -> Result<MediaFilter, AppError> {
        self.validate()?;

        let mut filter = MediaFilter::all();
        if let Some(collection) = self
            .collection
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            filter = filter.with_collection(collection);
        }
        if let Some(media_type) = self
            .media_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            filter = filter.with_type(media_type.parse()?);
        }
        Ok(filter)
    }
}
