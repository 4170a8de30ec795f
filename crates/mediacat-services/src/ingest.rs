//! Upload ingest: validate, store the bytes, record the file.

use std::sync::Arc;

use mediacat_core::constants::DEFAULT_MAX_UPLOAD_BYTES;
use mediacat_core::format::format_bytes;
use mediacat_core::models::{Caller, MediaRecord, NewMediaRecord};
use mediacat_core::validation::{
    display_name, normalize_collection_name, resolve_mime_type, sanitize_filename,
};
use mediacat_core::AppError;
use mediacat_db::CatalogStore;
use mediacat_storage::{media_storage_key, Storage};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::in_flight::InFlightUploads;

/// An uploaded file as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    pub data: Vec<u8>,
    pub declared_file_name: String,
    pub mime_type_hint: Option<String>,
    pub collection_name: Option<String>,
    pub custom_properties: Option<JsonValue>,
}

#[derive(Clone)]
pub struct IngestService {
    catalog: Arc<dyn CatalogStore>,
    storage: Arc<dyn Storage>,
    max_upload_bytes: usize,
    in_flight: InFlightUploads,
}

impl IngestService {
    pub fn new(catalog: Arc<dyn CatalogStore>, storage: Arc<dyn Storage>) -> Self {
        Self {
            catalog,
            storage,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            in_flight: InFlightUploads::new(),
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Keys this service has stored but not yet recorded. Share with the orphan sweep.
    pub fn in_flight(&self) -> &InFlightUploads {
        &self.in_flight
    }

    /// Validate an upload, write it to storage and add it to the catalog.
    ///
    /// On a catalog failure the stored object is deleted before the error is returned.
    /// The key stays in [`Self::in_flight`] until the record is committed or rolled back.
    #[tracing::instrument(
        skip(self, request),
        fields(
            file_name = %request.declared_file_name,
            size_bytes = request.data.len(),
            uploaded_by = ?caller.user_id,
            media_id = tracing::field::Empty
        )
    )]
    pub async fn ingest(
        &self,
        caller: &Caller,
        request: IngestRequest,
    ) -> Result<MediaRecord, AppError> {
        if request.declared_file_name.trim().is_empty() || request.data.is_empty() {
            return Err(AppError::InvalidInput(
                "A non-empty file is required".to_string(),
            ));
        }

        if request.data.len() > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File size {} exceeds maximum allowed size of {}",
                format_bytes(request.data.len() as u64),
                format_bytes(self.max_upload_bytes as u64)
            )));
        }

        let collection_name = normalize_collection_name(request.collection_name.as_deref())?;

        let custom_properties = match request.custom_properties {
            None | Some(JsonValue::Null) => JsonValue::Object(Default::default()),
            Some(value @ JsonValue::Object(_)) => value,
            Some(_) => {
                return Err(AppError::InvalidInput(
                    "custom_properties must be a JSON object".to_string(),
                ))
            }
        };

        let file_name = sanitize_filename(&request.declared_file_name)?;
        let mime_type = resolve_mime_type(request.mime_type_hint.as_deref(), &file_name);
        let size_bytes = request.data.len() as i64;

        let uuid = Uuid::new_v4();
        let storage_key = media_storage_key(uuid, &file_name);
        let _in_flight = self.in_flight.track(&storage_key);

        let url = self
            .storage
            .upload_with_key(&storage_key, request.data, &mime_type)
            .await?;

        let new_record = NewMediaRecord {
            uuid,
            name: display_name(&file_name),
            file_name,
            mime_type,
            size_bytes,
            collection_name,
            custom_properties,
            storage_key: storage_key.clone(),
            url,
            thumbnail_url: None,
            uploaded_by: caller.user_id,
        };

        match self.catalog.insert(new_record).await {
            Ok(record) => {
                tracing::Span::current().record("media_id", record.id);
                tracing::info!(
                    media_id = record.id,
                    collection = %record.collection_name,
                    mime_type = %record.mime_type,
                    "Media ingested"
                );
                Ok(record)
            }
            Err(e) => {
                if let Err(cleanup_err) = self.storage.delete(&storage_key).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        storage_key = %storage_key,
                        "Failed to cleanup storage file after catalog error"
                    );
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingInsertCatalog;
    use mediacat_core::models::MediaFilter;
    use mediacat_db::MemoryCatalog;
    use mediacat_storage::MemoryStorage;

    fn service_with(
        catalog: Arc<dyn CatalogStore>,
        storage: Arc<MemoryStorage>,
        max: usize,
    ) -> IngestService {
        IngestService::new(catalog, storage).with_max_upload_bytes(max)
    }

    fn request(name: &str, data: Vec<u8>) -> IngestRequest {
        IngestRequest {
            data,
            declared_file_name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn ingest_records_size_collection_and_mime() {
        let catalog = Arc::new(MemoryCatalog::new());
        let storage = Arc::new(MemoryStorage::default());
        let service = service_with(catalog.clone(), storage.clone(), 1024);

        let record = service
            .ingest(&Caller::anonymous(), request("Summer Photo.PNG", vec![7; 100]))
            .await
            .unwrap();

        assert_eq!(record.size_bytes, 100);
        assert_eq!(record.collection_name, "default");
        assert_eq!(record.file_name, "Summer_Photo.PNG");
        assert_eq!(record.name, "Summer_Photo");
        assert_eq!(record.mime_type, "image/png");
        assert_eq!(record.custom_properties, serde_json::json!({}));
        assert_eq!(
            record.storage_key,
            format!("media/{}/Summer_Photo.PNG", record.uuid)
        );
        assert_eq!(storage.download(&record.storage_key).await.unwrap(), vec![7; 100]);
        assert_eq!(catalog.get(record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn ingest_keeps_caller_collection_and_properties() {
        let catalog = Arc::new(MemoryCatalog::new());
        let storage = Arc::new(MemoryStorage::default());
        let service = service_with(catalog, storage, 1024);
        let user = Uuid::new_v4();

        let record = service
            .ingest(
                &Caller::api_key(Some(user)),
                IngestRequest {
                    data: b"%PDF-1.4".to_vec(),
                    declared_file_name: "report.pdf".to_string(),
                    mime_type_hint: Some("application/octet-stream".to_string()),
                    collection_name: Some("reports".to_string()),
                    custom_properties: Some(serde_json::json!({"quarter": 3})),
                },
            )
            .await
            .unwrap();

        assert_eq!(record.collection_name, "reports");
        assert_eq!(record.mime_type, "application/pdf");
        assert_eq!(record.custom_properties["quarter"], 3);
        assert_eq!(record.uploaded_by, Some(user));
    }

    #[tokio::test]
    async fn one_byte_over_limit_is_rejected_without_side_effects() {
        let catalog = Arc::new(MemoryCatalog::new());
        let storage = Arc::new(MemoryStorage::default());
        let service = service_with(catalog.clone(), storage.clone(), 16);

        service
            .ingest(&Caller::anonymous(), request("exact.bin", vec![0; 16]))
            .await
            .unwrap();

        let err = service
            .ingest(&Caller::anonymous(), request("big.bin", vec![0; 17]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
        assert!(err.is_validation_failure());
        assert_eq!(catalog.count().await.unwrap(), 1);
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn empty_or_invalid_uploads_are_validation_failures() {
        let catalog = Arc::new(MemoryCatalog::new());
        let storage = Arc::new(MemoryStorage::default());
        let service = service_with(catalog.clone(), storage.clone(), 1024);
        let caller = Caller::anonymous();

        let cases = vec![
            request("empty.txt", Vec::new()),
            request("", vec![1]),
            IngestRequest {
                collection_name: Some("bad collection!".to_string()),
                ..request("a.txt", vec![1])
            },
            IngestRequest {
                custom_properties: Some(serde_json::json!(["not", "an", "object"])),
                ..request("a.txt", vec![1])
            },
            request("..", vec![1]),
        ];

        for case in cases {
            let err = service.ingest(&caller, case).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "got {:?}", err);
        }
        assert_eq!(catalog.count().await.unwrap(), 0);
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn failed_catalog_insert_leaves_no_stored_object() {
        let storage = Arc::new(MemoryStorage::default());
        let service = service_with(Arc::new(FailingInsertCatalog::default()), storage.clone(), 1024);

        let err = service
            .ingest(&Caller::anonymous(), request("a.txt", b"hello".to_vec()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(storage.is_empty().await);
        assert!(service.in_flight().snapshot().is_empty());
    }

    #[tokio::test]
    async fn concurrent_ingests_into_one_collection_get_distinct_ids() {
        let catalog = Arc::new(MemoryCatalog::new());
        let storage = Arc::new(MemoryStorage::default());
        let service = service_with(catalog.clone(), storage, 1024);

        let before = catalog
            .list(&MediaFilter::all().with_collection("shared"))
            .await
            .unwrap()
            .len();

        let upload = |name: &'static str| {
            let service = service.clone();
            async move {
                service
                    .ingest(
                        &Caller::anonymous(),
                        IngestRequest {
                            collection_name: Some("shared".to_string()),
                            ..request(name, vec![1, 2, 3])
                        },
                    )
                    .await
            }
        };

        let (a, b) = tokio::join!(upload("a.txt"), upload("b.txt"));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.id, b.id);
        assert_ne!(a.uuid, b.uuid);

        let after = catalog
            .list(&MediaFilter::all().with_collection("shared"))
            .await
            .unwrap()
            .len();
        assert_eq!(after, before + 2);
    }
}
