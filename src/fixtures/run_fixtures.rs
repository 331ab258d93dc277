use serde_json::{json, Value};

pub fn run_response(status: &str) -> Value {
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
        "instructions": null,
        "tools": [],
        "metadata": {}
    })
}

pub fn failed_run_response(code: &str, message: &str) -> Value {
    let mut run = run_response("failed");
    run["last_error"] = json!({"code": code, "message": message});
    run
}

pub fn requires_action_response(call_ids: &[&str]) -> Value {
    let tool_calls: Vec<Value> = call_ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "type": "function",
                "function": {"name": "lookup_order", "arguments": "{\"order_id\":\"42\"}"}
            })
        })
        .collect();

    let mut run = run_response("requires_action");
    run["required_action"] = json!({
        "type": "submit_tool_outputs",
        "submit_tool_outputs": {"tool_calls": tool_calls}
    });
    run
}

pub fn thread_response() -> Value {
    json!({
        "id": "thread_abc123",
        "object": "thread",
        "created_at": 1699012949,
        "metadata": {},
        "tool_resources": {}
    })
}

pub fn message_response(text: &str) -> Value {
    json!({
        "id": "msg_abc123",
        "object": "thread.message",
        "created_at": 1699017614,
        "thread_id": "thread_abc123",
        "role": "user",
        "content": [{"type": "text", "text": {"value": text, "annotations": []}}],
        "attachments": [],
        "metadata": {}
    })
}

pub fn vector_store_response(status: &str) -> Value {
    json!({
        "id": "vs_abc123",
        "object": "vector_store",
        "created_at": 1699061776,
        "name": "Support FAQ",
        "usage_bytes": 139920,
        "file_counts": {"in_progress": 0, "completed": 3, "failed": 0, "cancelled": 0, "total": 3},
        "status": status
    })
}

pub fn file_response(id: &str, filename: &str, purpose: &str) -> Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 120000,
        "created_at": 1677610602,
        "filename": filename,
        "purpose": purpose
    })
}

pub fn error_response(message: &str) -> Value {
    json!({
        "error": {"message": message, "type": "invalid_request_error", "param": null, "code": null}
    })
}
