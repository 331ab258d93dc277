//! HTTP transport layer for the Assistants client.
//!
//! [`HttpTransport`] is the raw, single-shot seam that talks to the network.
//! [`RetryingTransport`] wraps it with the retry and cancellation policy every
//! non-streaming call goes through.

mod http_transport;
mod request;
mod response_parser;
mod retry;
mod stream_handler;

pub use http_transport::{HttpTransport, ReqwestTransport};
pub use request::{
    ByteStream, HttpRequest, HttpResponse, MultipartPart, RequestBody, StreamingResponse,
};
pub use response_parser::ResponseParser;
pub use retry::{RetryConfig, RetryingTransport};
pub use stream_handler::{
    classify_line, parse_frame, sse_lines, SkipReason, SseLine, SseLines, StreamFrame,
    DONE_SENTINEL,
};

use std::time::Duration;

/// Failures below the HTTP layer. An HTTP error status is never one of these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Timeout after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("TLS error: {message}")]
    Tls { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// The server answered with `status` but the body could not be read.
    #[error("Response body interrupted after status {status}: {message}")]
    BodyRead { status: u16, message: String },
}

impl TransportError {
    /// False once the server has answered, since it may already have acted
    /// on the request.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TransportError::BodyRead { .. })
    }
}

impl From<TransportError> for std::io::Error {
    fn from(err: TransportError) -> Self {
        let kind = match err {
            TransportError::Timeout { .. } => std::io::ErrorKind::TimedOut,
            TransportError::Connection { .. } => std::io::ErrorKind::ConnectionAborted,
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}
