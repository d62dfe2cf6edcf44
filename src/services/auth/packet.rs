/*
 * Responsibility
 * - Outbound message body for the remote authorization service
 * - The verdict type handed back to callers / handlers (opaque)
 */
use serde::Serialize;
use serde_json::{Map, Value};

use crate::services::auth::credential::Credential;

/// Caller-supplied options forwarded as-is. No schema is assumed.
pub type ValidationOptions = Map<String, Value>;

/// Verdict returned by the remote service. Passed through unchanged.
pub type ValidationResult = Value;

/// `{ "access_token": ..., "options": ... }`
///
/// Only built from a `Credential`, so `access_token` is never empty.
/// `options` is left out of the JSON when absent.
#[derive(Clone, Serialize)]
pub struct ValidationPacket {
    access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ValidationOptions>,
}

impl ValidationPacket {
    pub fn new(credential: Credential, options: Option<ValidationOptions>) -> Self {
        Self {
            access_token: credential.into_string(),
            options,
        }
    }
}
