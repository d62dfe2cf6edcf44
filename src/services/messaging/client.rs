//! Messaging client interface used by the auth forwarder.
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Result type for messaging operations.
pub type MessagingResult<T> = Result<T, MessagingError>;

/// Messaging-layer errors (transport/command/payload/remote).
///
/// Note:
/// - Kept independent from `ForwardError`/`AppError`; the forwarder wraps it
///   as the source of a transport failure.
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("messaging connection error: {0}")]
    BackendConnection(String),
    #[error("messaging command error: {0}")]
    BackendCommand(String),
    #[error("messaging payload error: {0}")]
    InvalidPayload(String),
    #[error("no responder subscribed to `{0}`")]
    NoResponder(String),
    #[error("remote service returned an error: {0}")]
    Remote(String),
    #[error("remote service completed without a reply")]
    EmptyReply,
}

/// A request/response client over a message broker.
///
/// Each call is identified by an operation name (`pattern`) and resolves with
/// exactly one reply payload. Implementations are shared across requests
/// behind an `Arc` and must be safe for concurrent use.
#[async_trait]
pub trait MessagingClient: Send + Sync + 'static {
    // Returns the broker backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Send `payload` under `pattern` and wait for the single reply.
    async fn send(&self, pattern: &str, payload: Value) -> MessagingResult<Value>;
}
