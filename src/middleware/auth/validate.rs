//! Remote authorization guard: forward the credential, stash the verdict in
//! request extensions, then run the wrapped handler.
//!
//! The handler behind this layer only runs once the remote service has
//! answered. Any failure short-circuits with an `AppError` response.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::Validation;
use crate::error::AppError;
use crate::state::AppState;

/// Put the guard in front of every route of `router`.
///
/// Example:
/// ```ignore
/// let guarded = Router::new().route("/session", get(session));
/// let guarded = middleware::auth::validate::apply(guarded, state.clone());
/// let v1 = Router::new().route("/health", get(health)).merge(guarded);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // `from_fn` cannot take a State extractor, so the state is handed over explicitly.
    router.layer(middleware::from_fn_with_state(state, validate_middleware))
}

async fn validate_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let verdict = state.forwarder.forward(req.headers()).await?;

    // middleware -> extractor hand-off
    req.extensions_mut().insert(Validation(verdict));

    Ok(next.run(req).await)
}
