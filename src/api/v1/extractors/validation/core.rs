use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::services::auth::ValidationResult;
use crate::state::AppState;

use super::Validation;

/// Hands the remote verdict to a handler.
/// Assumes the guard already inserted `Validation` into request extensions;
/// answers 401 otherwise (route not guarded / middleware missing).
pub struct ValidationExtractor(pub ValidationResult);

impl FromRequestParts<AppState> for ValidationExtractor
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Validation>()
            .map(|validation| ValidationExtractor(validation.0.clone()))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
