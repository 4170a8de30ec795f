use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use mediacat_core::models::{ListMeta, ListQuery, MediaListResponse, MediaSummary};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/media",
    tag = "media",
    params(ListQuery),
    responses(
        (status = 200, description = "Media matching the filters, in insertion order", body = MediaListResponse),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "list_media"))]
pub async fn list_media(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Query(query) = query?;
    let page = state.catalog.list(&query).await?;

    let data: Vec<MediaSummary> = page.items.iter().map(MediaSummary::from).collect();
    let meta = ListMeta {
        total: page.total,
        count: data.len(),
    };

    Ok(Json(MediaListResponse { data, meta }))
}
