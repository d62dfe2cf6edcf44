//! Wire envelopes for the broker request/reply exchange.
//!
//! Request (published on `<pattern>`):
//!   `{"pattern": "...", "data": {...}, "id": "<correlation id>"}`
//!
//! Reply (published on `<pattern>.reply`):
//!   `{"id": "<correlation id>", "response": ..., "err": ..., "isDisposed": bool}`
//!
//! Replies for every in-flight call share one reply channel, so callers must
//! match on `id`.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::services::messaging::client::{MessagingError, MessagingResult};

#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a> {
    pub pattern: &'a str,
    pub data: Value,
    pub id: &'a str,
}

/// `response`/`err` keep "key absent" (`None`) apart from "key is null"
/// (`Some(Value::Null)`): a `null` verdict is still a verdict.
#[derive(Debug, Deserialize)]
pub struct ReplyEnvelope {
    pub id: String,
    #[serde(default, deserialize_with = "present")]
    pub response: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub err: Option<Value>,
    #[serde(default, rename = "isDisposed")]
    pub is_disposed: bool,
}

// Only runs when the key exists, so `null` becomes `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// `err` counts only when truthy: null, false, 0, "" are not errors.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// What a single reply message means for the call waiting on `id`.
#[derive(Debug)]
pub enum ReplyOutcome {
    /// Reply for another caller (or a non-terminal frame); keep waiting.
    Pending,
    Resolved(MessagingResult<Value>),
}

pub fn reply_channel(pattern: &str) -> String {
    format!("{pattern}.reply")
}

pub fn encode_request(pattern: &str, id: &str, data: Value) -> MessagingResult<String> {
    let envelope = RequestEnvelope { pattern, data, id };
    serde_json::to_string(&envelope).map_err(|e| MessagingError::InvalidPayload(e.to_string()))
}

/// Interpret a raw reply frame for the call identified by `id`.
///
/// Frames that fail to decode cannot be attributed to a caller and are skipped.
pub fn interpret_reply(raw: &str, id: &str) -> ReplyOutcome {
    let reply: ReplyEnvelope = match serde_json::from_str(raw) {
        Ok(reply) => reply,
        Err(err) => {
            tracing::debug!(error = %err, "skipping undecodable reply frame");
            return ReplyOutcome::Pending;
        }
    };

    if reply.id != id {
        return ReplyOutcome::Pending;
    }

    if let Some(err) = reply.err.filter(is_truthy) {
        let message = match err {
            Value::String(s) => s,
            other => other.to_string(),
        };
        return ReplyOutcome::Resolved(Err(MessagingError::Remote(message)));
    }

    match reply.response {
        Some(response) => ReplyOutcome::Resolved(Ok(response)),
        None if reply.is_disposed => ReplyOutcome::Resolved(Err(MessagingError::EmptyReply)),
        None => ReplyOutcome::Pending,
    }
}
