use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use mediacat_core::models::StatsResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/media/stats",
    tag = "media",
    responses(
        (status = 200, description = "Catalog totals grouped by collection and MIME type", body = StatsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "media_stats"))]
pub async fn media_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let data = state.catalog.stats().await?;
    Ok(Json(StatsResponse { data }))
}
