mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue};
use serde_json::json;

use auth_forwarder::services::auth::{AuthForwarder, ForwardError, ValidationOptions, forward};
use auth_forwarder::services::messaging::{MessagingClient, MessagingError};
use auth_forwarder::VALIDATE_AUTHORIZATION;

use common::{Behavior, RecordingClient, bearer};

#[tokio::test]
async fn missing_header_fails_without_remote_call() {
    let client = RecordingClient::new(Behavior::Reply(json!({"valid": true})));

    let err = forward(&HeaderMap::new(), Some(client.as_ref()), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ForwardError::MissingCredential));
    assert_eq!(err.to_string(), "Authorization header is missing");
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn empty_header_counts_as_missing() {
    let client = RecordingClient::new(Behavior::Reply(json!(true)));
    let mut headers = HeaderMap::new();
    headers.insert("authorization", HeaderValue::from_static(""));

    let err = forward(&headers, Some(client.as_ref()), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ForwardError::MissingCredential));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn missing_client_fails_when_header_present() {
    let err = forward(&bearer("abc123"), None, None).await.unwrap_err();

    assert!(matches!(err, ForwardError::MissingClient));
    assert_eq!(err.to_string(), "RmqClient is missing");
}

#[tokio::test]
async fn missing_header_is_reported_before_missing_client() {
    let err = forward(&HeaderMap::new(), None, None).await.unwrap_err();
    assert!(matches!(err, ForwardError::MissingCredential));
}

#[tokio::test]
async fn sends_exactly_one_call_with_stripped_token() {
    let client = RecordingClient::new(Behavior::Reply(json!({"valid": true, "sub": "u-1"})));

    let verdict = forward(&bearer("abc123"), Some(client.as_ref()), None)
        .await
        .unwrap();

    assert_eq!(verdict, json!({"valid": true, "sub": "u-1"}));

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, VALIDATE_AUTHORIZATION);
    assert_eq!(calls[0].0, "validate-authorization");
    assert_eq!(calls[0].1, json!({"access_token": "abc123"}));
}

#[tokio::test]
async fn uppercase_header_name_is_found() {
    let client = RecordingClient::new(Behavior::Reply(json!("ok")));
    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::HeaderName::from_bytes(b"Authorization").unwrap(),
        HeaderValue::from_static("Bearer abc123"),
    );

    forward(&headers, Some(client.as_ref()), None).await.unwrap();

    assert_eq!(client.calls()[0].1["access_token"], "abc123");
}

#[tokio::test]
async fn options_are_passed_through() {
    let client = RecordingClient::new(Behavior::Reply(json!(null)));
    let options: ValidationOptions = json!({"roles": ["admin"], "strict": true})
        .as_object()
        .cloned()
        .unwrap();

    forward(&bearer("t"), Some(client.as_ref()), Some(&options))
        .await
        .unwrap();

    assert_eq!(
        client.calls()[0].1,
        json!({"access_token": "t", "options": {"roles": ["admin"], "strict": true}})
    );
}

#[tokio::test]
async fn reply_is_returned_unchanged() {
    let reply = json!([1, "two", {"three": null}]);
    let client = RecordingClient::new(Behavior::Reply(reply.clone()));

    let verdict = forward(&bearer("t"), Some(client.as_ref()), None)
        .await
        .unwrap();

    assert_eq!(verdict, reply);
}

#[tokio::test]
async fn remote_failure_is_wrapped() {
    let client = RecordingClient::new(Behavior::Fail);

    let err = forward(&bearer("t"), Some(client.as_ref()), None)
        .await
        .unwrap_err();

    match err {
        ForwardError::Transport(MessagingError::BackendConnection(msg)) => {
            assert_eq!(msg, "broker unreachable")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn forwarder_uses_injected_client_and_options() {
    let client = RecordingClient::new(Behavior::Reply(json!({"valid": true})));
    let shared: Arc<dyn MessagingClient> = client.clone();
    let options = json!({"audience": "api"}).as_object().cloned();

    let forwarder = AuthForwarder::new(Some(shared)).with_options(options);
    let verdict = forwarder.forward(&bearer("abc123")).await.unwrap();

    assert_eq!(verdict, json!({"valid": true}));
    assert_eq!(
        client.calls()[0].1,
        json!({"access_token": "abc123", "options": {"audience": "api"}})
    );
}

#[tokio::test]
async fn forwarder_without_client_reports_missing_client() {
    let forwarder = AuthForwarder::new(None);
    assert!(!forwarder.has_client());

    let err = forwarder.forward(&bearer("abc123")).await.unwrap_err();
    assert!(matches!(err, ForwardError::MissingClient));
}

#[tokio::test]
async fn forwarder_times_out_on_silent_remote() {
    let client = RecordingClient::new(Behavior::Hang);
    let shared: Arc<dyn MessagingClient> = client.clone();
    let limit = Duration::from_millis(20);

    let forwarder = AuthForwarder::new(Some(shared)).with_timeout(Some(limit));
    let err = forwarder.forward(&bearer("abc123")).await.unwrap_err();

    assert!(matches!(err, ForwardError::Timeout(d) if d == limit));
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let client = RecordingClient::new(Behavior::Reply(json!({"valid": true})));
    let shared: Arc<dyn MessagingClient> = client.clone();
    let forwarder = Arc::new(AuthForwarder::new(Some(shared)));

    let mut tasks = Vec::new();
    for i in 0..8 {
        let forwarder = forwarder.clone();
        tasks.push(tokio::spawn(async move {
            forwarder.forward(&bearer(&format!("token-{i}"))).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let mut tokens: Vec<String> = client
        .calls()
        .into_iter()
        .map(|(_, payload)| payload["access_token"].as_str().unwrap().to_string())
        .collect();
    tokens.sort();
    let mut expected: Vec<String> = (0..8).map(|i| format!("token-{i}")).collect();
    expected.sort();
    assert_eq!(tokens, expected);
}
