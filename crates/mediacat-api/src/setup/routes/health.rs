//! Health check handler.

use crate::constants::HEALTH_CHECK_TIMEOUT_SECS;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

/// Key that is never written; probing it checks the backend answers.
const STORAGE_PROBE_KEY: &str = "health/probe";

#[derive(Debug, Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub catalog: String,
    pub catalog_backend: &'static str,
    pub storage: String,
    pub storage_backend: String,
    pub version: &'static str,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timeout = Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS);

    let catalog = run_check(timeout, state.store().ping(), "unhealthy").await;
    let storage = run_check(
        timeout,
        async { state.storage.exists(STORAGE_PROBE_KEY).await.map(|_| ()) },
        "unhealthy",
    )
    .await;

    let healthy = catalog == "healthy" && storage == "healthy";
    if !healthy {
        tracing::error!(catalog = %catalog, storage = %storage, "Health check failed");
    }

    let body = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        catalog,
        catalog_backend: state.store().backend_name(),
        storage,
        storage_backend: state.storage.backend_type().to_string(),
        version: env!("CARGO_PKG_VERSION"),
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}
