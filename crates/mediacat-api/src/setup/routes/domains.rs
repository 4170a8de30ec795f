//! Media route groups for the versioned API and the dashboard.

use crate::constants::{API_PREFIX, DASHBOARD_PREFIX};
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn media_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/media", API_PREFIX),
            get(handlers::media_list::list_media),
        )
        .route(
            &format!("{}/media/upload", API_PREFIX),
            post(handlers::media_upload::upload_media),
        )
        .route(
            &format!("{}/media/stats", API_PREFIX),
            get(handlers::media_stats::media_stats),
        )
        .route(
            &format!("{}/media/cleanup", API_PREFIX),
            post(handlers::media_cleanup::cleanup_orphans),
        )
        .route(
            &format!("{}/media/{{id}}", API_PREFIX),
            get(handlers::media_get::get_media).delete(handlers::media_delete::delete_media),
        )
}

pub fn dashboard_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/media", DASHBOARD_PREFIX),
            get(handlers::media_list::list_media),
        )
        .route(
            &format!("{}/media/upload", DASHBOARD_PREFIX),
            post(handlers::media_upload::upload_media),
        )
        .route(
            &format!("{}/media/{{id}}", DASHBOARD_PREFIX),
            axum::routing::delete(handlers::media_delete::delete_media),
        )
}
