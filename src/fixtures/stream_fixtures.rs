use serde_json::json;

/// `data:` line for a text delta event.
pub fn text_delta_line(text: &str) -> String {
    let event = json!({
        "id": "msg_abc123",
        "object": "thread.message.delta",
        "delta": {"content": [{"index": 0, "type": "text", "text": {"value": text, "annotations": []}}]}
    });
    format!("data: {}", event)
}

/// `data:` line for a run lifecycle event that carries no text.
pub fn run_event_line(status: &str) -> String {
    let event = json!({
        "id": "run_abc123",
        "object": "thread.run",
        "thread_id": "thread_abc123",
        "assistant_id": "asst_abc123",
        "status": status
    });
    format!("data: {}", event)
}
