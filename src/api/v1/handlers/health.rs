/*
 * Responsibility
 * - GET /health (liveness; not guarded)
 * - Reports whether a messaging client is wired, without calling it
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "messaging": state.forwarder.has_client(),
        })),
    )
}
