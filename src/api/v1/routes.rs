/*
 * Responsibility
 * - v1 URL layout
 * - /health stays open, everything in `guarded` goes through the
 *   remote authorization guard
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{health::health, session::session};
use crate::middleware::auth::validate;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let guarded = Router::new().route("/session", get(session));
    let guarded = validate::apply(guarded, state);

    Router::new().route("/health", get(health)).merge(guarded)
}
