//! Vector store creation and readiness against a mock server

use super::*;
use integrations_openai_assistants::errors::{AssistantsError, ValidationError};
use integrations_openai_assistants::{
    CancellationToken, CreateVectorStoreRequest, VectorStoreStatus, WaitOptions,
};
use wiremock::matchers::body_partial_json;

fn store_body(status: &str) -> Value {
    json!({
        "id": "vs_abc123",
        "object": "vector_store",
        "created_at": 1699061776,
        "name": "Support FAQ",
        "usage_bytes": 0,
        "file_counts": {"in_progress": 1, "completed": 0, "failed": 0, "cancelled": 0, "total": 1},
        "status": status
    })
}

fn file_body(id: &str, filename: &str) -> Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 2048,
        "created_at": 1699061776,
        "filename": filename,
        "purpose": "assistants"
    })
}

#[tokio::test]
async fn test_create_and_wait_until_ready() {
    let server = MockServer::start().await;
    authed("GET", "/files/file_1")
        .respond_with(json_response(file_body("file_1", "faq.pdf")))
        .mount(&server)
        .await;
    authed("POST", "/vector_stores")
        .and(body_partial_json(json!({"name": "Support FAQ", "file_ids": ["file_1"]})))
        .respond_with(json_response(store_body("in_progress")))
        .expect(1)
        .mount(&server)
        .await;
    authed("GET", "/vector_stores/vs_abc123")
        .respond_with(json_response(store_body("in_progress")))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    authed("GET", "/vector_stores/vs_abc123")
        .respond_with(json_response(store_body("completed")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cancel = CancellationToken::new();

    let store = client
        .vector_stores()
        .create(
            CreateVectorStoreRequest::new("Support FAQ", vec!["file_1".to_string()]),
            &cancel,
        )
        .await
        .unwrap();
    let ready = client
        .vector_store_waiter()
        .wait(
            &store.id,
            WaitOptions::new(Duration::from_secs(5), Duration::from_millis(40))
                .with_initial_delay(Duration::from_millis(10)),
            &cancel,
        )
        .await
        .unwrap();

    assert_eq!(ready.status, VectorStoreStatus::Completed);
}

#[tokio::test]
async fn test_unsupported_file_blocks_creation() {
    let server = MockServer::start().await;
    authed("GET", "/files/file_1")
        .respond_with(json_response(file_body("file_1", "slides.pptx")))
        .mount(&server)
        .await;
    authed("POST", "/vector_stores")
        .respond_with(json_response(store_body("in_progress")))
        .expect(0)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .vector_stores()
        .create(
            CreateVectorStoreRequest::new("Support FAQ", vec!["file_1".to_string()]),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        AssistantsError::Validation(ValidationError::UnsupportedFileType { .. })
    ));
}

#[tokio::test]
async fn test_wait_times_out_distinctly() {
    let server = MockServer::start().await;
    authed("GET", "/vector_stores/vs_abc123")
        .respond_with(json_response(store_body("in_progress")))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .vector_store_waiter()
        .wait(
            "vs_abc123",
            WaitOptions::new(Duration::from_millis(50), Duration::from_millis(20))
                .with_initial_delay(Duration::from_millis(5)),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(error.is_timeout());
}
