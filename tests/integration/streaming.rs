//! Streaming runs against a mock server

use super::*;
use integrations_openai_assistants::CancellationToken;
use wiremock::matchers::body_partial_json;

fn delta(text: &str) -> String {
    let event = json!({
        "id": "msg_abc123",
        "object": "thread.message.delta",
        "delta": {"content": [{"index": 0, "type": "text", "text": {"value": text}}]}
    });
    format!("event: thread.message.delta\ndata: {}\n\n", event)
}

fn event_stream(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

async fn mount_message(server: &MockServer) {
    authed("POST", "/threads/thread_abc123/messages")
        .respond_with(json_response(message_body("Where is my order?")))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_stream_collects_reply() {
    let server = MockServer::start().await;
    mount_message(&server).await;

    let mut body = String::from("event: thread.run.created\ndata: {\"object\":\"thread.run\",\"status\":\"queued\"}\n\n");
    body.push_str(&delta("Your order "));
    body.push_str("data: {broken\n\n");
    body.push_str(&delta("has shipped."));
    body.push_str("event: done\ndata: [DONE]\n\n");

    authed("POST", "/threads/thread_abc123/runs")
        .and(header("accept", "text/event-stream"))
        .and(body_partial_json(json!({"assistant_id": "asst_abc123", "stream": true})))
        .respond_with(event_stream(body))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .run_streamer()
        .stream(
            "thread_abc123",
            "asst_abc123",
            "Where is my order?",
            &CancellationToken::new(),
        )
        .collect_text()
        .await
        .unwrap();

    assert_eq!(reply, "Your order has shipped.");
}

#[tokio::test]
async fn test_stream_error_status_is_not_retried() {
    let server = MockServer::start().await;
    mount_message(&server).await;
    authed("POST", "/threads/thread_abc123/runs")
        .respond_with(ResponseTemplate::new(500).set_body_json(api_error("The server had an error.")))
        .expect(1)
        .mount(&server)
        .await;

    let mut stream = client_for(&server).run_streamer().stream(
        "thread_abc123",
        "asst_abc123",
        "Where is my order?",
        &CancellationToken::new(),
    );

    assert!(stream.text.recv().await.is_none());
    let error = stream.errors.recv().await.unwrap();
    assert_eq!(error.status_code(), Some(500));
    assert!(error.to_string().contains("The server had an error."));
}

#[tokio::test]
async fn test_stream_without_done_ends_cleanly() {
    let server = MockServer::start().await;
    mount_message(&server).await;
    authed("POST", "/threads/thread_abc123/runs")
        .respond_with(event_stream(delta("partial")))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .run_streamer()
        .stream("thread_abc123", "asst_abc123", "hi", &CancellationToken::new())
        .collect_text()
        .await
        .unwrap();

    assert_eq!(reply, "partial");
}
