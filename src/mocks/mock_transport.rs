//! Mock HTTP transport for testing

use crate::transport::{
    HttpRequest, HttpResponse, HttpTransport, MultipartPart, RequestBody, StreamingResponse,
    TransportError,
};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use http::{HeaderMap, Method};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted transport: responses and streams are served in the order queued,
/// and every request is recorded.
#[derive(Clone, Default)]
pub struct MockHttpTransport {
    inner: Arc<Mutex<MockHttpTransportInner>>,
}

#[derive(Default)]
struct MockHttpTransportInner {
    responses: VecDeque<MockOutcome>,
    streams: VecDeque<MockStream>,
    requests: Vec<RecordedRequest>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
    pub streaming: bool,
}

enum MockOutcome {
    Response(HttpResponse),
    Failure(TransportError),
}

enum MockStream {
    Body {
        status: u16,
        chunks: Vec<Result<Bytes, TransportError>>,
        hold_open: bool,
    },
    Failure(TransportError),
}

impl MockHttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: HttpResponse) -> Self {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(MockOutcome::Response(response));
        self
    }

    pub fn with_json_response(self, status: u16, body: serde_json::Value) -> Self {
        self.with_response(HttpResponse::new(status, body.to_string()))
    }

    pub fn with_text_response(self, status: u16, body: &str) -> Self {
        self.with_response(HttpResponse::new(status, body.to_string()))
    }

    /// Queues a failure where no response arrives at all.
    pub fn with_failure(self, error: TransportError) -> Self {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(MockOutcome::Failure(error));
        self
    }

    /// Queues a 200 event stream, one chunk per line.
    pub fn with_sse_stream(self, lines: &[&str]) -> Self {
        self.with_stream(200, sse_chunks(lines), false)
    }

    /// Queues an event stream that never ends after its lines are read.
    pub fn with_open_sse_stream(self, lines: &[&str]) -> Self {
        self.with_stream(200, sse_chunks(lines), true)
    }

    pub fn with_stream(
        self,
        status: u16,
        chunks: Vec<Result<Bytes, TransportError>>,
        hold_open: bool,
    ) -> Self {
        self.inner
            .lock()
            .unwrap()
            .streams
            .push_back(MockStream::Body {
                status,
                chunks,
                hold_open,
            });
        self
    }

    pub fn with_stream_failure(self, error: TransportError) -> Self {
        self.inner
            .lock()
            .unwrap()
            .streams
            .push_back(MockStream::Failure(error));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    /// Number of recorded requests to exactly `path`.
    pub fn requests_to(&self, path: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub fn verify_request(&self, method: Method, path: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .any(|r| r.method == method && r.path == path)
    }

    pub fn verify_request_with_body(&self, method: Method, path: &str, body_contains: &str) -> bool {
        self.inner.lock().unwrap().requests.iter().any(|r| {
            r.method == method
                && r.path == path
                && r.body
                    .as_ref()
                    .map(|b| b.contains(body_contains))
                    .unwrap_or(false)
        })
    }

    fn record(&self, request: &HttpRequest, streaming: bool) {
        let body = match &request.body {
            RequestBody::Empty => None,
            RequestBody::Json(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            RequestBody::Multipart(parts) => Some(describe_parts(parts)),
        };
        self.inner.lock().unwrap().requests.push(RecordedRequest {
            method: request.method.clone(),
            path: request.path.clone(),
            headers: request.headers.clone(),
            body,
            timeout: request.timeout,
            streaming,
        });
    }
}

fn sse_chunks(lines: &[&str]) -> Vec<Result<Bytes, TransportError>> {
    lines
        .iter()
        .map(|line| Ok(Bytes::from(format!("{}\n", line))))
        .collect()
}

fn describe_parts(parts: &[MultipartPart]) -> String {
    parts
        .iter()
        .map(|part| match part {
            MultipartPart::Text { name, value } => format!("{}={}", name, value),
            MultipartPart::File { name, filename, .. } => format!("{}=@{}", name, filename),
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.record(request, false);

        let next = self.inner.lock().unwrap().responses.pop_front();
        match next {
            Some(MockOutcome::Response(response)) => Ok(response),
            Some(MockOutcome::Failure(error)) => Err(error),
            None => Err(TransportError::InvalidResponse {
                message: format!("no mock response queued for {} {}", request.method, request.path),
            }),
        }
    }

    async fn send_streaming(
        &self,
        request: &HttpRequest,
    ) -> Result<StreamingResponse, TransportError> {
        self.record(request, true);

        let next = self.inner.lock().unwrap().streams.pop_front();
        match next {
            Some(MockStream::Body {
                status,
                chunks,
                hold_open,
            }) => {
                let body = futures::stream::iter(chunks);
                let stream: crate::transport::ByteStream = if hold_open {
                    Box::pin(body.chain(futures::stream::pending()))
                } else {
                    Box::pin(body)
                };
                Ok(StreamingResponse {
                    status,
                    headers: HeaderMap::new(),
                    stream,
                })
            }
            Some(MockStream::Failure(error)) => Err(error),
            None => Err(TransportError::InvalidResponse {
                message: format!("no mock stream queued for {} {}", request.method, request.path),
            }),
        }
    }
}
