use crate::auth::CallerCtx;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use mediacat_core::models::{CleanupRequest, CleanupResponse};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v1/media/cleanup",
    tag = "media",
    request_body = CleanupRequest,
    responses(
        (status = 200, description = "Orphaned files found (and removed unless dry_run)", body = CleanupResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 502, description = "Storage could not be listed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, caller, body),
    fields(user_id = ?caller.0.user_id, operation = "cleanup_orphans")
)]
pub async fn cleanup_orphans(
    caller: CallerCtx,
    State(state): State<Arc<AppState>>,
    body: Result<Json<CleanupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Json(request) = body?;
    let data = state.sweeper.sweep_orphans(request.dry_run).await?;

    tracing::info!(
        dry_run = data.dry_run,
        orphaned = data.orphaned_keys.len(),
        removed = data.removed_keys.len(),
        "Cleanup requested"
    );

    Ok(Json(CleanupResponse { data }))
}
