use crate::auth::CallerCtx;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mediacat_core::models::{MediaSummary, MediaUploadResponse, UPLOAD_SUCCESS_MESSAGE};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v1/media/upload",
    tag = "media",
    request_body(
        content = String,
        description = "Multipart form: `file` (required), `collection` and `custom_properties` (JSON object) optional",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 201, description = "File uploaded successfully", body = MediaUploadResponse),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 413, description = "File exceeds the upload limit", body = ErrorResponse),
        (status = 502, description = "Storage failure", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, caller, multipart),
    fields(user_id = ?caller.0.user_id, operation = "upload_media")
)]
pub async fn upload_media(
    caller: CallerCtx,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = extract_upload_form(multipart).await?;
    let record = state.ingest.ingest(&caller.0, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MediaUploadResponse {
            data: MediaSummary::from(&record),
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        }),
    ))
}
