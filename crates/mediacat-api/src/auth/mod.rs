//! API key authentication and the caller extractor.

pub mod middleware;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use mediacat_core::models::Caller;
use mediacat_core::AppError;

use crate::error::HttpAppError;

pub use middleware::{auth_middleware, AuthState};

/// The authenticated caller, placed in request extensions by [`auth_middleware`].
///
/// Extracted from request parts so it can be combined with `Multipart`.
#[derive(Debug, Clone)]
pub struct CallerCtx(pub Caller);

impl<S> FromRequestParts<S> for CallerCtx
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Caller>()
            .cloned()
            .map(CallerCtx)
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Caller context missing from request".to_string(),
                ))
            })
    }
}
