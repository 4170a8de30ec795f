use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::format::format_size;

/// Per-collection aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CollectionStats {
    pub collection_name: String,
    pub count: i64,
    pub total_size_bytes: i64,
}

/// Per-MIME-type count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MimeTypeStats {
    pub mime_type: String,
    pub count: i64,
}

/// Raw catalog aggregates. Groups are ordered by first appearance (lowest id first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_count: i64,
    pub total_size_bytes: i64,
    pub by_collection: Vec<CollectionStats>,
    pub by_mime_type: Vec<MimeTypeStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionReport {
    pub collection_name: String,
    pub count: i64,
    pub total_size_bytes: i64,
    #[schema(example = "3.25 MB")]
    pub total_size_formatted: String,
}

/// Statistics as reported to HTTP and CLI callers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsReport {
    pub total_count: i64,
    pub total_size_bytes: i64,
    pub total_size_formatted: String,
    pub by_collection: Vec<CollectionReport>,
    pub by_mime_type: Vec<MimeTypeStats>,
}

impl From<CatalogStats> for StatsReport {
    fn from(stats: CatalogStats) -> Self {
        StatsReport {
            total_count: stats.total_count,
            total_size_bytes: stats.total_size_bytes,
            total_size_formatted: format_size(stats.total_size_bytes),
            by_collection: stats
                .by_collection
                .into_iter()
                .map(|c| CollectionReport {
                    total_size_formatted: format_size(c.total_size_bytes),
                    collection_name: c.collection_name,
                    count: c.count,
                    total_size_bytes: c.total_size_bytes,
                })
                .collect(),
            by_mime_type: stats.by_mime_type,
        }
    }
}

/// Outcome of an orphan sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SweepReport {
    pub dry_run: bool,
    /// Stored objects with no catalog record
    pub orphaned_keys: Vec<String>,
    /// Objects actually deleted (always empty on a dry run)
    pub removed_keys: Vec<String>,
    /// Orphans whose deletion failed
    pub failed_keys: Vec<String>,
}
