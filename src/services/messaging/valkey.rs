use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use serde_json::Value;
use uuid::Uuid;

use crate::services::messaging::client::{MessagingClient, MessagingError, MessagingResult};
use crate::services::messaging::envelope::{self, ReplyOutcome};

/// Valkey/Redis-backed request/response client (pub/sub).
///
/// A call publishes `{pattern, data, id}` on channel `<pattern>` and waits on
/// `<pattern>.reply` for the frame carrying the same `id`. Each call subscribes
/// on its own connection before publishing, so a fast responder cannot reply
/// into the void.
#[derive(Clone, Debug)]
pub struct ValkeyMessagingClient {
    client: redis::Client,
    manager: redis::aio::ConnectionManager,
}

impl ValkeyMessagingClient {
    // Create a client from a URL like `redis://localhost:6379`
    pub async fn new(url: &str) -> Result<Self, MessagingError> {
        let client =
            redis::Client::open(url).map_err(|e| MessagingError::BackendConnection(e.to_string()))?;

        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| MessagingError::BackendConnection(e.to_string()))?;

        Ok(Self { client, manager })
    }
}

#[async_trait]
impl MessagingClient for ValkeyMessagingClient {
    fn backend_name(&self) -> &'static str {
        "valkey"
    }

    async fn send(&self, pattern: &str, payload: Value) -> MessagingResult<Value> {
        let id = Uuid::new_v4().to_string();
        let reply_channel = envelope::reply_channel(pattern);
        let frame = envelope::encode_request(pattern, &id, payload)?;

        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| MessagingError::BackendConnection(e.to_string()))?;

        pubsub
            .subscribe(&reply_channel)
            .await
            .map_err(|e| MessagingError::BackendCommand(e.to_string()))?;

        // PUBLISH returns the number of subscribers that received the frame.
        let mut conn = self.manager.clone();
        let receivers: i64 = redis::cmd("PUBLISH")
            .arg(pattern)
            .arg(&frame)
            .query_async(&mut conn)
            .await
            .map_err(|e| MessagingError::BackendCommand(e.to_string()))?;

        if receivers == 0 {
            return Err(MessagingError::NoResponder(pattern.to_string()));
        }

        tracing::debug!(pattern, correlation_id = %id, receivers, "published request");

        let frames = pubsub.on_message().map(|msg| {
            msg.get_payload::<String>()
                .map_err(|e| MessagingError::InvalidPayload(e.to_string()))
        });

        wait_for_reply(frames, &id, &reply_channel).await
    }
}

/// Drain reply frames until the one for `id` resolves the call.
///
/// Frames for other callers and non-terminal frames are skipped. A stream that
/// ends first is a closed subscription.
async fn wait_for_reply<S>(mut frames: S, id: &str, reply_channel: &str) -> MessagingResult<Value>
where
    S: Stream<Item = MessagingResult<String>> + Unpin,
{
    while let Some(frame) = frames.next().await {
        if let ReplyOutcome::Resolved(result) = envelope::interpret_reply(&frame?, id) {
            return result;
        }
    }

    Err(MessagingError::BackendConnection(format!(
        "subscription to `{reply_channel}` closed before a reply arrived"
    )))
}
