use crate::auth::AuthManager;
use crate::errors::{AssistantsError, AssistantsResult, ValidationError};
use crate::services::audio::{audio_content_type, TranscriptionRequest};
use crate::services::ApiContext;
use crate::transport::{HttpRequest, MultipartPart, ResponseParser, RetryingTransport};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Per-attempt limit for a transcription upload.
pub const TRANSCRIPTION_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait AudioService: Send + Sync {
    /// Returns the plain-text transcript of the audio.
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<String>;
}

pub struct AudioServiceImpl {
    context: ApiContext,
}

impl AudioServiceImpl {
    pub fn new(transport: RetryingTransport, auth_manager: Arc<dyn AuthManager>) -> Self {
        Self {
            context: ApiContext::new(transport, auth_manager),
        }
    }
}

#[async_trait]
impl AudioService for AudioServiceImpl {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<String> {
        if request.data.is_empty() {
            return Err(AssistantsError::Validation(ValidationError::InvalidParameter {
                parameter: "data".to_string(),
                reason: "audio cannot be empty".to_string(),
            }));
        }

        debug!(
            filename = %request.filename,
            bytes = request.data.len(),
            model = %request.model,
            "Transcribing audio"
        );

        let mut parts = vec![
            MultipartPart::File {
                name: "file".to_string(),
                content_type: audio_content_type(&request.filename).to_string(),
                filename: request.filename,
                data: request.data,
            },
            MultipartPart::Text {
                name: "model".to_string(),
                value: request.model,
            },
            MultipartPart::Text {
                name: "response_format".to_string(),
                value: "text".to_string(),
            },
        ];
        if let Some(language) = request.language {
            parts.push(MultipartPart::Text {
                name: "language".to_string(),
                value: language,
            });
        }
        if let Some(prompt) = request.prompt {
            parts.push(MultipartPart::Text {
                name: "prompt".to_string(),
                value: prompt,
            });
        }

        let http_request = HttpRequest::post("/audio/transcriptions")
            .multipart(parts)
            .with_timeout(TRANSCRIPTION_TIMEOUT)
            .with_cancellation(cancel);
        let response = self.context.execute(http_request).await?;
        let body = ResponseParser::parse_bytes(response)?;

        String::from_utf8(body.to_vec())
            .map(|text| text.trim_end().to_string())
            .map_err(|e| {
                AssistantsError::Deserialization(format!("transcript is not valid UTF-8: {}", e))
            })
    }
}
