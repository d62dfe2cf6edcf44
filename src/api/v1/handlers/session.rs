/*
 * Responsibility
 * - GET /session (guarded)
 * - Echo the remote verdict back to the caller as-is
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::ValidationExtractor;

pub async fn session(ValidationExtractor(verdict): ValidationExtractor) -> Json<Value> {
    Json(json!({ "validation": verdict }))
}
