//! Run lifecycle against a mock server

use super::*;
use async_trait::async_trait;
use integrations_openai_assistants::errors::RunFailure;
use integrations_openai_assistants::{
    AssistantsResult, CancellationToken, CreateRunRequest, Run, RunStatus, ToolCall,
    ToolCallHandler, ToolOutput,
};
use wiremock::matchers::body_json;

const RUN_PATH: &str = "/threads/thread_abc123/runs/run_abc123";

async fn mount_statuses(server: &MockServer, statuses: &[&str]) {
    for status in statuses {
        authed("GET", RUN_PATH)
            .respond_with(json_response(run_body(status)))
            .up_to_n_times(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_create_and_wait_for_run() {
    let server = MockServer::start().await;
    authed("POST", "/threads/thread_abc123/runs")
        .and(body_json(json!({"assistant_id": "asst_abc123"})))
        .respond_with(json_response(run_body("queued")))
        .expect(1)
        .mount(&server)
        .await;
    mount_statuses(&server, &["queued", "in_progress", "completed"]).await;

    let client = client_for(&server);
    let cancel = CancellationToken::new();

    let run = client
        .runs()
        .create("thread_abc123", CreateRunRequest::new("asst_abc123"), &cancel)
        .await
        .unwrap();
    let finished = client
        .run_poller()
        .wait_for_run(&run.thread_id, &run.id, &cancel)
        .await
        .unwrap();

    assert_eq!(finished.status, RunStatus::Completed);
}

#[tokio::test]
async fn test_wait_for_run_surfaces_last_error() {
    let server = MockServer::start().await;
    let mut failed = run_body("failed");
    failed["last_error"] = json!({"code": "rate_limit_exceeded", "message": "You exceeded your quota."});
    authed("GET", RUN_PATH)
        .respond_with(json_response(failed))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .run_poller()
        .wait_for_run("thread_abc123", "run_abc123", &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(
        error.run_failure(),
        Some(&RunFailure::Failed {
            code: "rate_limit_exceeded".to_string(),
            message: "You exceeded your quota.".to_string(),
        })
    );
}

struct Shipping;

#[async_trait]
impl ToolCallHandler for Shipping {
    async fn handle(&self, _run: &Run, calls: &[ToolCall]) -> AssistantsResult<Vec<ToolOutput>> {
        Ok(calls
            .iter()
            .map(|call| ToolOutput::new(call.id.as_str(), format!("{} -> shipped", call.function.name)))
            .collect())
    }
}

#[tokio::test]
async fn test_tool_outputs_are_submitted() {
    let server = MockServer::start().await;
    let mut requires_action = run_body("requires_action");
    requires_action["required_action"] = json!({
        "type": "submit_tool_outputs",
        "submit_tool_outputs": {"tool_calls": [{
            "id": "call_1",
            "type": "function",
            "function": {"name": "lookup_order", "arguments": "{\"order_id\":\"42\"}"}
        }]}
    });
    authed("GET", RUN_PATH)
        .respond_with(json_response(requires_action))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    authed("GET", RUN_PATH)
        .respond_with(json_response(run_body("completed")))
        .mount(&server)
        .await;
    authed("POST", "/threads/thread_abc123/runs/run_abc123/submit_tool_outputs")
        .and(body_json(json!({
            "tool_outputs": [{"tool_call_id": "call_1", "output": "lookup_order -> shipped"}]
        })))
        .respond_with(json_response(run_body("queued")))
        .expect(1)
        .mount(&server)
        .await;

    let run = client_for(&server)
        .run_poller()
        .wait_with_tool_handler(
            "thread_abc123",
            "run_abc123",
            &Shipping,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(run.status, RunStatus::Completed);
}

#[tokio::test]
async fn test_busy_thread_message_is_retried() {
    let server = MockServer::start().await;
    authed("POST", "/threads/thread_abc123/messages")
        .respond_with(ResponseTemplate::new(400).set_body_json(api_error(
            "Can't add messages to thread_abc123 while a run run_abc123 is active.",
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    authed("POST", "/threads/thread_abc123/messages")
        .respond_with(json_response(message_body("hello")))
        .mount(&server)
        .await;

    let message = client_for(&server)
        .messages()
        .create(
            "thread_abc123",
            integrations_openai_assistants::CreateMessageRequest::user("hello"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(message.text(), "hello");
}
