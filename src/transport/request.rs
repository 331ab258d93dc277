use bytes::Bytes;
use futures::Stream;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::pin::Pin;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::TransportError;
use crate::errors::{AssistantsError, AssistantsResult, ValidationError};

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Body of an outbound request.
///
/// Multipart bodies are kept as parts rather than a built form so the request
/// can be replayed on every retry attempt.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Bytes),
    Multipart(Vec<MultipartPart>),
}

#[derive(Debug, Clone)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: String,
        data: Bytes,
    },
}

/// A single outbound HTTP request bound to its cancellation context.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            timeout: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> AssistantsResult<Self> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            AssistantsError::Validation(ValidationError::InvalidParameter {
                parameter: "header_name".to_string(),
                reason: e.to_string(),
            })
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            AssistantsError::Validation(ValidationError::InvalidParameter {
                parameter: "header_value".to_string(),
                reason: e.to_string(),
            })
        })?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> AssistantsResult<Self> {
        let encoded = serde_json::to_vec(body).map_err(|e| {
            AssistantsError::Serialization(format!("Failed to serialize request body: {}", e))
        })?;
        self.body = RequestBody::Json(Bytes::from(encoded));
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Binds the request to a caller's cancellation context.
    pub fn with_cancellation(mut self, cancel: &CancellationToken) -> Self {
        self.cancel = cancel.clone();
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Response whose body is still being received.
pub struct StreamingResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub stream: ByteStream,
}

impl StreamingResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl std::fmt::Debug for StreamingResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
