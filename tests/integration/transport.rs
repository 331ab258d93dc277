//! Retry behaviour of the reqwest transport

use super::*;
use integrations_openai_assistants::errors::AssistantsError;
use integrations_openai_assistants::{CancellationToken, CreateThreadRequest};

fn thread_body() -> Value {
    json!({"id": "thread_abc123", "object": "thread", "created_at": 1699012949, "metadata": {}})
}

#[tokio::test]
async fn test_timed_out_attempt_is_retried() {
    let server = MockServer::start().await;
    authed("POST", "/threads")
        .respond_with(json_response(thread_body()).set_delay(Duration::from_secs(5)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    authed("POST", "/threads")
        .respond_with(json_response(thread_body()))
        .mount(&server)
        .await;

    let config = test_config(&server).with_timeout(Duration::from_millis(200));
    let client = AssistantsClientBuilder::new()
        .with_config(config)
        .build()
        .unwrap();

    let thread = client
        .threads()
        .create(CreateThreadRequest::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(thread.id, "thread_abc123");
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
}

#[tokio::test]
async fn test_http_error_status_is_not_retried() {
    let server = MockServer::start().await;
    authed("GET", "/threads/thread_missing")
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(api_error("No thread found with id 'thread_missing'.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .threads()
        .retrieve("thread_missing", &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), Some(404));
}

#[tokio::test]
async fn test_unreachable_server_exhausts_attempts() {
    let config = AssistantsConfig::new(API_KEY)
        .with_base_url("http://127.0.0.1:9")
        .with_retry(
            RetryConfig::new()
                .base_delay(Duration::from_millis(1))
                .max_delay(Duration::from_millis(5)),
        );
    let client = AssistantsClientBuilder::new()
        .with_config(config)
        .build()
        .unwrap();

    let error = client
        .threads()
        .retrieve("thread_abc123", &CancellationToken::new())
        .await
        .unwrap_err();

    match error {
        AssistantsError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 5),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_cancelled_request_is_never_sent() {
    let server = MockServer::start().await;
    authed("POST", "/threads")
        .respond_with(json_response(thread_body()))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let error = client_for(&server)
        .threads()
        .create(CreateThreadRequest::default(), &cancel)
        .await
        .unwrap_err();

    assert!(error.is_cancelled());
}
