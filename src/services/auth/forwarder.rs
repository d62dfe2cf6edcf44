//! Forward a request's bearer credential to the remote authorization service.
//!
//! `forward` is the core operation: one header check, one client check, one
//! request/response call. `AuthForwarder` owns the injected client, static
//! options and the local timeout, and offers `guard` for wrapping arbitrary
//! handlers.

use std::{fmt, future::Future, sync::Arc, time::Duration};

use axum::http::{HeaderMap, Request, request::Parts};
use serde_json::Value;
use thiserror::Error;

use crate::services::auth::credential::{extract_credential, header_names};
use crate::services::auth::packet::{ValidationOptions, ValidationPacket, ValidationResult};
use crate::services::messaging::{MessagingClient, MessagingError};

/// Operation name understood by the remote authorization service.
pub const VALIDATE_AUTHORIZATION: &str = "validate-authorization";

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Authorization header is missing")]
    MissingCredential,
    #[error("RmqClient is missing")]
    MissingClient,
    #[error("authorization validation failed: {0}")]
    Transport(#[from] MessagingError),
    #[error("authorization validation timed out after {0:?}")]
    Timeout(Duration),
}

/// Anything that exposes request headers.
pub trait HeaderSource {
    fn headers(&self) -> &HeaderMap;
}

impl HeaderSource for HeaderMap {
    fn headers(&self) -> &HeaderMap {
        self
    }
}

impl<B> HeaderSource for Request<B> {
    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }
}

impl HeaderSource for Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Validate `headers` against the remote service and return its reply unchanged.
///
/// Order of checks: credential, then client. No remote call is made unless
/// both are present. No timeout is applied here.
pub async fn forward(
    headers: &HeaderMap,
    client: Option<&dyn MessagingClient>,
    options: Option<&ValidationOptions>,
) -> Result<ValidationResult, ForwardError> {
    tracing::debug!(headers = ?header_names(headers), "validating request authorization");

    let credential = extract_credential(headers).ok_or(ForwardError::MissingCredential)?;
    let client = client.ok_or(ForwardError::MissingClient)?;

    let fingerprint = credential.fingerprint();
    let packet = ValidationPacket::new(credential, options.cloned());
    let payload = serde_json::to_value(&packet)
        .map_err(|e| MessagingError::InvalidPayload(e.to_string()))?;

    let reply = match client.send(VALIDATE_AUTHORIZATION, payload).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(
                error = %err,
                credential = %fingerprint,
                backend = client.backend_name(),
                "authorization validation call failed"
            );
            return Err(ForwardError::Transport(err));
        }
    };

    tracing::debug!(
        credential = %fingerprint,
        backend = client.backend_name(),
        reply_kind = json_kind(&reply),
        "authorization validation reply received"
    );

    Ok(reply)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Forwarder with its collaborators injected.
///
/// Cheap to share (`Arc` inside `AppState`); holds no per-request state.
#[derive(Clone, Default)]
pub struct AuthForwarder {
    client: Option<Arc<dyn MessagingClient>>,
    options: Option<ValidationOptions>,
    timeout: Option<Duration>,
}

impl AuthForwarder {
    pub fn new(client: Option<Arc<dyn MessagingClient>>) -> Self {
        Self {
            client,
            options: None,
            timeout: None,
        }
    }

    pub fn with_options(mut self, options: Option<ValidationOptions>) -> Self {
        self.options = options;
        self
    }

    /// `None` waits for the reply indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub async fn forward(&self, headers: &HeaderMap) -> Result<ValidationResult, ForwardError> {
        let call = forward(headers, self.client.as_deref(), self.options.as_ref());

        let Some(limit) = self.timeout else {
            return call.await;
        };

        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?limit, "authorization validation timed out");
                Err(ForwardError::Timeout(limit))
            }
        }
    }

    /// Run `handler(request)` only after the request's credential validates.
    ///
    /// The handler is called at most once, with the request it was given.
    pub async fn guard<R, F, Fut>(&self, request: R, handler: F) -> Result<Fut::Output, ForwardError>
    where
        R: HeaderSource,
        F: FnOnce(R) -> Fut,
        Fut: Future,
    {
        self.forward(request.headers()).await?;
        Ok(handler(request).await)
    }
}

impl fmt::Debug for AuthForwarder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthForwarder")
            .field("backend", &self.client.as_ref().map(|c| c.backend_name()))
            .field("has_options", &self.options.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}
