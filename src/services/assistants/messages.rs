use crate::auth::AuthManager;
use crate::errors::{AssistantsError, AssistantsResult};
use crate::services::assistants::AssistantTool;
use crate::services::ApiContext;
use crate::transport::{HttpRequest, HttpResponse, ResponseParser, RetryingTransport};
use crate::types::{ListResponse, PaginationParams};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Body fragment the API returns when a run is still active on the thread.
pub const BUSY_THREAD_MARKER: &str = "Can't add messages to thread";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    pub thread_id: String,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<MessageContent>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
}

impl Message {
    /// Concatenated value of every text part, in order.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                MessageContent::Text { text } => Some(text.value.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    ImageFile { image_file: ImageFile },
    /// Content kinds this client does not model.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    pub file_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub file_id: String,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest {
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

impl CreateMessageRequest {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            attachments: None,
            metadata: None,
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }
}

#[async_trait]
pub trait MessageService: Send + Sync {
    /// Appends a message to a thread.
    ///
    /// Sent as a single attempt. If the thread is busy with an active run the
    /// request is repeated once after the configured delay.
    async fn create(
        &self,
        thread_id: &str,
        request: CreateMessageRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Message>;

    async fn list(
        &self,
        thread_id: &str,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<Message>>;
}

pub struct MessageServiceImpl {
    context: ApiContext,
    busy_thread_retry_delay: Duration,
}

impl MessageServiceImpl {
    pub fn new(
        transport: RetryingTransport,
        auth_manager: Arc<dyn AuthManager>,
        busy_thread_retry_delay: Duration,
    ) -> Self {
        Self {
            context: ApiContext::new(transport, auth_manager),
            busy_thread_retry_delay,
        }
    }
}

fn is_busy_thread(response: &HttpResponse) -> bool {
    !response.is_success() && String::from_utf8_lossy(&response.body).contains(BUSY_THREAD_MARKER)
}

#[async_trait]
impl MessageService for MessageServiceImpl {
    async fn create(
        &self,
        thread_id: &str,
        request: CreateMessageRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Message> {
        let request = HttpRequest::post(format!("/threads/{}/messages", thread_id))
            .json(&request)?
            .with_cancellation(cancel);

        let mut response = self.context.send_once(request.clone()).await?;

        if is_busy_thread(&response) {
            warn!(
                thread_id,
                delay_ms = self.busy_thread_retry_delay.as_millis() as u64,
                "Thread has an active run, retrying message once"
            );
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AssistantsError::Cancelled),
                _ = tokio::time::sleep(self.busy_thread_retry_delay) => {}
            }
            response = self.context.send_once(request).await?;
        }

        ResponseParser::parse_response(&response)
    }

    async fn list(
        &self,
        thread_id: &str,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<Message>> {
        let request = HttpRequest::get(params.apply_to(&format!("/threads/{}/messages", thread_id)))
            .with_cancellation(cancel);
        self.context.request(request).await
    }
}
