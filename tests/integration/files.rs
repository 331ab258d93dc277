//! File upload and transcription against a mock server

use super::*;
use integrations_openai_assistants::{
    CancellationToken, FilePurpose, FileUploadRequest, TranscriptionRequest,
};
use wiremock::matchers::header_regex;

#[tokio::test]
async fn test_upload_sends_multipart_form() {
    let server = MockServer::start().await;
    authed("POST", "/files")
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(json_response(json!({
            "id": "file_abc123",
            "object": "file",
            "bytes": 5,
            "created_at": 1699061776,
            "filename": "data_1699061776.txt",
            "purpose": "assistants"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = client_for(&server)
        .files()
        .upload(
            FileUploadRequest::new(&b"hello"[..], FilePurpose::Assistants, "txt"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(file.id, "file_abc123");
    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"purpose\""));
    assert!(body.contains("assistants"));
    assert!(body.contains("filename=\"data_"));
}

#[tokio::test]
async fn test_transcription_returns_text() {
    let server = MockServer::start().await;
    authed("POST", "/audio/transcriptions")
        .respond_with(ResponseTemplate::new(200).set_body_string("Where is my order?\n"))
        .expect(1)
        .mount(&server)
        .await;

    let transcript = client_for(&server)
        .audio()
        .transcribe(
            TranscriptionRequest::new(&b"ID3\x03"[..], "question.mp3"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(transcript, "Where is my order?");
    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("whisper-1"));
    assert!(body.contains("filename=\"question.mp3\""));
}
