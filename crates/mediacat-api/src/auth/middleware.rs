use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use mediacat_core::models::Caller;
use mediacat_core::AppError;
use subtle::ConstantTimeEq;

use crate::error::HttpAppError;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone, Debug)]
pub struct AuthState {
    /// `None` disables authentication and every request is anonymous.
    pub api_key: Option<String>,
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Pull the presented key from `X-API-Key` or `Authorization: Bearer <key>`.
fn presented_key(request: &Request) -> Result<Option<&str>, AppError> {
    let headers = request.headers();

    if let Some(value) = headers.get(API_KEY_HEADER) {
        return value
            .to_str()
            .map(|v| Some(v.trim()))
            .map_err(|_| AppError::Unauthorized("Invalid API key header".to_string()));
    }

    match headers.get("Authorization").and_then(|h| h.to_str().ok()) {
        Some(header) => match header.strip_prefix("Bearer ") {
            Some(token) => Ok(Some(token.trim())),
            None => Err(AppError::Unauthorized(
                "Invalid authorization header format".to_string(),
            )),
        },
        None => Ok(None),
    }
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(expected) = auth_state.api_key.as_deref() else {
        request.extensions_mut().insert(Caller::anonymous());
        return next.run(request).await;
    };

    let token = match presented_key(&request) {
        Ok(Some(token)) => token,
        Ok(None) => {
            tracing::debug!("Request rejected: missing API key");
            return HttpAppError(AppError::Unauthorized("Missing API key".to_string()))
                .into_response();
        }
        Err(e) => return HttpAppError(e).into_response(),
    };

    if !secure_compare(token, expected) {
        tracing::warn!(path = %request.uri().path(), "Request rejected: invalid API key");
        return HttpAppError(AppError::Unauthorized("Invalid API key".to_string()))
            .into_response();
    }

    request.extensions_mut().insert(Caller::api_key(None));
    next.run(request).await
}
