//! Integration tests using WireMock
//!
//! These run the full client, including the reqwest transport, against a
//! local mock server.

mod files;
mod runs;
mod streaming;
mod transport;
mod vector_stores;

use integrations_openai_assistants::transport::RetryConfig;
use integrations_openai_assistants::{AssistantsClient, AssistantsClientBuilder, AssistantsConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const API_KEY: &str = "sk-test-key-1234567890";

/// Short delays so retry and polling paths finish quickly.
pub fn test_config(server: &MockServer) -> AssistantsConfig {
    AssistantsConfig::new(API_KEY)
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(2))
        .with_retry(
            RetryConfig::new()
                .base_delay(Duration::from_millis(10))
                .max_delay(Duration::from_millis(40)),
        )
        .with_poll_interval(Duration::from_millis(10))
        .with_busy_thread_retry_delay(Duration::from_millis(10))
}

pub fn client_for(server: &MockServer) -> Arc<dyn AssistantsClient> {
    AssistantsClientBuilder::new()
        .with_config(test_config(server))
        .build()
        .expect("client should build")
}

/// A mock that only matches authenticated Assistants v2 requests.
pub fn authed(http_method: &str, request_path: &str) -> MockBuilder {
    Mock::given(method(http_method))
        .and(path(request_path))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(header("openai-beta", "assistants=v2"))
}

pub fn json_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn run_body(status: &str) -> Value {
    json!({
        "id": "run_abc123",
        "object": "thread.run",
        "created_at": 1699063290,
        "thread_id": "thread_abc123",
        "assistant_id": "asst_abc123",
        "status": status,
        "required_action": null,
        "last_error": null,
        "model": "gpt-4o",
        "tools": []
    })
}

pub fn message_body(text: &str) -> Value {
    json!({
        "id": "msg_abc123",
        "object": "thread.message",
        "created_at": 1699017614,
        "thread_id": "thread_abc123",
        "role": "user",
        "content": [{"type": "text", "text": {"value": text, "annotations": []}}]
    })
}

pub fn api_error(message: &str) -> Value {
    json!({
        "error": {"message": message, "type": "invalid_request_error", "param": null, "code": null}
    })
}
