//! Streaming a run's reply as text fragments.

use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::auth::AuthManager;
use crate::errors::{AssistantsError, AssistantsResult, ErrorMapper, MAX_BODY_EXCERPT};
use crate::services::assistants::{CreateMessageRequest, CreateRunRequest, MessageService};
use crate::services::ApiContext;
use crate::transport::{
    classify_line, parse_frame, sse_lines, ByteStream, HttpRequest, RetryingTransport, SseLine,
    StreamFrame,
};

const EVENT_STREAM: &str = "text/event-stream";

/// Receiving side of a streamed run.
///
/// `text` yields fragments in arrival order. `errors` carries at most one
/// error. Both close when the stream ends, fails or is cancelled.
#[derive(Debug)]
pub struct RunStream {
    pub text: mpsc::Receiver<String>,
    pub errors: mpsc::Receiver<AssistantsError>,
}

impl RunStream {
    /// Drains the stream and returns the concatenated reply.
    pub async fn collect_text(mut self) -> AssistantsResult<String> {
        let mut reply = String::new();
        while let Some(fragment) = self.text.recv().await {
            reply.push_str(&fragment);
        }

        match self.errors.recv().await {
            Some(error) => Err(error),
            None => Ok(reply),
        }
    }
}

pub struct RunStreamer {
    messages: Arc<dyn MessageService>,
    context: ApiContext,
    stream_timeout: Duration,
}

impl RunStreamer {
    pub fn new(
        transport: RetryingTransport,
        auth_manager: Arc<dyn AuthManager>,
        messages: Arc<dyn MessageService>,
        stream_timeout: Duration,
    ) -> Self {
        Self {
            messages,
            context: ApiContext::new(transport, auth_manager),
            stream_timeout,
        }
    }

    /// Adds `content` as a user message, starts a streaming run and returns
    /// the channels the reply is delivered on.
    ///
    /// Must be called from within a tokio runtime; the stream is consumed by
    /// a spawned task.
    pub fn stream(
        &self,
        thread_id: &str,
        assistant_id: &str,
        content: &str,
        cancel: &CancellationToken,
    ) -> RunStream {
        let (text_tx, text_rx) = mpsc::channel(1);
        let (error_tx, error_rx) = mpsc::channel(1);

        let worker = StreamWorker {
            messages: Arc::clone(&self.messages),
            context: self.context.clone(),
            stream_timeout: self.stream_timeout,
            thread_id: thread_id.to_string(),
            assistant_id: assistant_id.to_string(),
            content: content.to_string(),
            cancel: cancel.clone(),
        };

        tokio::spawn(async move {
            if let Err(error) = worker.run(&text_tx).await {
                warn!(error = %error, "Run stream ended with error");
                // Capacity 1 and a single send, so this never waits.
                let _ = error_tx.send(error).await;
            }
        });

        RunStream {
            text: text_rx,
            errors: error_rx,
        }
    }
}

struct StreamWorker {
    messages: Arc<dyn MessageService>,
    context: ApiContext,
    stream_timeout: Duration,
    thread_id: String,
    assistant_id: String,
    content: String,
    cancel: CancellationToken,
}

impl StreamWorker {
    async fn run(self, text: &mpsc::Sender<String>) -> AssistantsResult<()> {
        self.messages
            .create(
                &self.thread_id,
                CreateMessageRequest::user(self.content.as_str()),
                &self.cancel,
            )
            .await?;

        let body = CreateRunRequest::new(self.assistant_id.as_str()).streaming();
        let request = HttpRequest::post(format!("/threads/{}/runs", self.thread_id))
            .json(&body)?
            .with_header("Accept", EVENT_STREAM)?
            .with_timeout(self.stream_timeout)
            .with_cancellation(&self.cancel);

        let response = self.context.open_stream(request).await?;
        if !response.is_success() {
            let body = self.read_error_body(response.stream).await?;
            return Err(ErrorMapper::from_response(
                response.status,
                &response.headers,
                &body,
            ));
        }

        info!(thread_id = %self.thread_id, "Run stream opened");
        let mut lines = sse_lines(response.stream);
        let mut fragments: u64 = 0;

        loop {
            let line = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(AssistantsError::Cancelled),
                line = lines.next_line() => line,
            };

            let line = match line {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!(fragments, "Run stream closed without terminator");
                    return Ok(());
                }
                Err(e) => {
                    return Err(AssistantsError::Stream(format!(
                        "failed to read event stream: {}",
                        e
                    )))
                }
            };

            let payload = match classify_line(&line) {
                SseLine::Ignored => continue,
                SseLine::Done => {
                    debug!(fragments, "Run stream finished");
                    return Ok(());
                }
                SseLine::Data(payload) => payload,
            };

            match parse_frame(payload) {
                StreamFrame::TextDelta(fragment) => {
                    fragments += 1;
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => return Err(AssistantsError::Cancelled),
                        sent = text.send(fragment) => {
                            if sent.is_err() {
                                debug!("Run stream receiver dropped");
                                return Ok(());
                            }
                        }
                    }
                }
                StreamFrame::Skipped(reason) => debug!(?reason, "Skipping stream frame"),
            }
        }
    }

    async fn read_error_body(&self, mut stream: ByteStream) -> AssistantsResult<Vec<u8>> {
        let mut body = Vec::new();
        loop {
            let chunk = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(AssistantsError::Cancelled),
                chunk = stream.next() => chunk,
            };
            match chunk {
                Some(Ok(bytes)) => {
                    body.extend_from_slice(&bytes);
                    if body.len() > MAX_BODY_EXCERPT * 8 {
                        break;
                    }
                }
                Some(Err(_)) | None => break,
            }
        }
        Ok(body)
    }
}
