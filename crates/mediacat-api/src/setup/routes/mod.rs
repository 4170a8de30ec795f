//! Route configuration and setup.
//!
//! Media route groups live in [domains](domains); the health check in [health](health).

mod domains;
mod health;

use crate::api_doc::ApiDoc;
use crate::auth::{auth_middleware, AuthState};
use crate::constants::{HTTP_CONCURRENCY_LIMIT, MULTIPART_OVERHEAD_BYTES};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use mediacat_core::{Config, StorageBackend};
use mediacat_infra::request_id_middleware;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Build the full application router.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        api_key: config.api_key().map(str::to_string),
    });
    if auth_state.api_key.is_none() {
        tracing::warn!("MEDIACAT_API_KEY not set - API authentication is disabled");
    }

    let protected_routes = domains::media_routes()
        .merge(domains::dashboard_routes())
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"));

    let mut app = public_routes.merge(protected_routes);

    if config.storage_backend() == StorageBackend::Local {
        if let Some(mount) = files_mount_path(config.local_storage_base_url()) {
            tracing::info!(
                mount = %mount,
                root = %config.local_storage_path(),
                "Serving stored files"
            );
            app = app.nest_service(&mount, ServeDir::new(config.local_storage_path()));
        }
    }

    let body_limit = request_body_limit(config.max_upload_bytes());

    let app = app
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

/// HTTP body limit for a given upload limit, leaving room for multipart framing.
fn request_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

/// Path component of the public base URL, e.g. `/files` for `http://localhost:3000/files`.
fn files_mount_path(base_url: &str) -> Option<String> {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    let path = without_scheme.find('/').map(|i| &without_scheme[i..])?;
    let path = path.trim_end_matches('/');

    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{files_mount_path, request_body_limit, MULTIPART_OVERHEAD_BYTES};

    #[test]
    fn mount_path_comes_from_base_url() {
        assert_eq!(
            files_mount_path("http://localhost:3000/files"),
            Some("/files".to_string())
        );
        assert_eq!(
            files_mount_path("https://cdn.example.com/media/files/"),
            Some("/media/files".to_string())
        );
        assert_eq!(files_mount_path("http://localhost:3000"), None);
        assert_eq!(files_mount_path("http://localhost:3000/"), None);
    }

    #[test]
    fn body_limit_adds_overhead_without_overflowing() {
        assert_eq!(request_body_limit(1024), 1024 + MULTIPART_OVERHEAD_BYTES);
        assert_eq!(request_body_limit(usize::MAX), usize::MAX);
        assert_eq!(request_body_limit(usize::MAX - 1), usize::MAX);
    }
}
