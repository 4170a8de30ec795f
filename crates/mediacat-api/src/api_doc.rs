//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.
//!
//! Response bodies referenced from handler annotations are collected automatically.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use mediacat_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mediacat API",
        version = "0.1.0",
        description = "Media catalog API: upload, list, inspect, delete and report on stored media files, and sweep orphaned files from storage. Endpoints are versioned under /api/v1/ and take the API key in X-API-Key or an Authorization: Bearer header."
    ),
    paths(
        handlers::media_list::list_media,
        handlers::media_upload::upload_media,
        handlers::media_get::get_media,
        handlers::media_delete::delete_media,
        handlers::media_stats::media_stats,
        handlers::media_cleanup::cleanup_orphans,
    ),
    components(
        schemas(
            error::ErrorResponse,
            models::MediaSummary,
            models::SweepReport,
        )
    ),
    tags(
        (name = "media", description = "Media catalog operations")
    )
)]
pub struct ApiDoc;
