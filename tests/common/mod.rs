#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, header};
use serde_json::Value;

use auth_forwarder::services::messaging::{MessagingClient, MessagingError, MessagingResult};

#[derive(Debug, Clone)]
pub enum Behavior {
    Reply(Value),
    Fail,
    Hang,
}

/// In-memory client that records every call and answers per `Behavior`.
#[derive(Debug)]
pub struct RecordingClient {
    behavior: Behavior,
    calls: Mutex<Vec<(String, Value)>>,
}

impl RecordingClient {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingClient for RecordingClient {
    fn backend_name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, pattern: &str, payload: Value) -> MessagingResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((pattern.to_string(), payload));

        match &self.behavior {
            Behavior::Reply(value) => Ok(value.clone()),
            Behavior::Fail => Err(MessagingError::BackendConnection(
                "broker unreachable".into(),
            )),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

pub fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}
