use crate::auth::CallerCtx;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use mediacat_core::models::{MessageResponse, DELETE_SUCCESS_MESSAGE};
use mediacat_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/api/v1/media/{id}",
    tag = "media",
    params(
        ("id" = i64, Path, description = "Media ID")
    ),
    responses(
        (status = 200, description = "Media deleted successfully", body = MessageResponse),
        (status = 404, description = "Media not found", body = ErrorResponse),
        (status = 502, description = "Stored file could not be removed; record kept", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, caller),
    fields(
        media_id = id,
        user_id = ?caller.0.user_id,
        operation = "delete_media"
    )
)]
pub async fn delete_media(
    caller: CallerCtx,
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.catalog.delete(&caller.0, id).await? {
        return Err(AppError::NotFound("Media not found".to_string()).into());
    }

    Ok(Json(MessageResponse::new(DELETE_SUCCESS_MESSAGE)))
}
