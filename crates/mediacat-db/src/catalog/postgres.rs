use std::collections::HashSet;

use async_trait::async_trait;
use mediacat_core::models::{
    CatalogStats, CollectionStats, MediaFilter, MediaRecord, MimeTypeStats, NewMediaRecord,
};
use mediacat_core::AppError;
use sqlx::{PgPool, Postgres};

use super::CatalogStore;

const MEDIA_COLUMNS: &str = "id, uuid, name, file_name, mime_type, size_bytes, collection_name, \
     custom_properties, storage_key, url, thumbnail_url, uploaded_by, created_at";

/// Postgres-backed catalog over the `media` table.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalog {
    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select"))]
    async fn list(&self, filter: &MediaFilter) -> Result<Vec<MediaRecord>, AppError> {
        let sql = format!(
            "SELECT {} FROM media \
             WHERE ($1::text IS NULL OR collection_name = $1) \
               AND ($2::text IS NULL OR left(mime_type, char_length($2)) = $2) \
             ORDER BY id",
            MEDIA_COLUMNS
        );

        let records = sqlx::query_as::<Postgres, MediaRecord>(&sql)
            .bind(filter.collection_name.as_deref())
            .bind(filter.mime_type_prefix.as_deref())
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select", db.record_id = id))]
    async fn get(&self, id: i64) -> Result<Option<MediaRecord>, AppError> {
        let sql = format!("SELECT {} FROM media WHERE id = $1", MEDIA_COLUMNS);
        let record = sqlx::query_as::<Postgres, MediaRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "media", db.operation = "insert"))]
    async fn insert(&self, record: NewMediaRecord) -> Result<MediaRecord, AppError> {
        let sql = format!(
            r#"
            INSERT INTO media (
                uuid, name, file_name, mime_type, size_bytes, collection_name,
                custom_properties, storage_key, url, thumbnail_url, uploaded_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            MEDIA_COLUMNS
        );

        let inserted = sqlx::query_as::<Postgres, MediaRecord>(&sql)
            .bind(record.uuid)
            .bind(&record.name)
            .bind(&record.file_name)
            .bind(&record.mime_type)
            .bind(record.size_bytes)
            .bind(&record.collection_name)
            .bind(&record.custom_properties)
            .bind(&record.storage_key)
            .bind(&record.url)
            .bind(record.thumbnail_url.as_deref())
            .bind(record.uploaded_by)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(media_id = inserted.id, "Media record inserted");
        Ok(inserted)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "delete", db.record_id = id))]
    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        // RETURNING makes concurrent deletes of one row report success exactly once.
        let removed = sqlx::query_scalar::<Postgres, i64>("DELETE FROM media WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(removed.is_some())
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "count"))]
    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<Postgres, i64>("SELECT COUNT(*) FROM media")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "aggregate"))]
    async fn stats(&self) -> Result<CatalogStats, AppError> {
        let (total_count, total_size_bytes) = sqlx::query_as::<Postgres, (i64, i64)>(
            "SELECT COUNT(*), COALESCE(SUM(size_bytes), 0)::BIGINT FROM media",
        )
        .fetch_one(&self.pool)
        .await?;

        let by_collection = sqlx::query_as::<Postgres, CollectionStats>(
            r#"
            SELECT collection_name,
                   COUNT(*) AS count,
                   COALESCE(SUM(size_bytes), 0)::BIGINT AS total_size_bytes
            FROM media
            GROUP BY collection_name
            ORDER BY MIN(id)
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let by_mime_type = sqlx::query_as::<Postgres, MimeTypeStats>(
            r#"
            SELECT mime_type, COUNT(*) AS count
            FROM media
            GROUP BY mime_type
            ORDER BY MIN(id)
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(CatalogStats {
            total_count,
            total_size_bytes,
            by_collection,
            by_mime_type,
        })
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select"))]
    async fn storage_keys(&self) -> Result<HashSet<String>, AppError> {
        let keys = sqlx::query_scalar::<Postgres, String>("SELECT storage_key FROM media")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys.into_iter().collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
