use crate::auth::AuthManager;
use crate::errors::AssistantsResult;
use crate::services::assistants::{CreateMessageRequest, ToolResources};
use crate::services::ApiContext;
use crate::transport::{HttpRequest, RetryingTransport};
use crate::types::DeletionStatus;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub tool_resources: Option<ToolResources>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
}

/// Body of `POST /threads`; the default serializes to `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateThreadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<CreateMessageRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[async_trait]
pub trait ThreadService: Send + Sync {
    async fn create(
        &self,
        request: CreateThreadRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Thread>;

    async fn retrieve(&self, thread_id: &str, cancel: &CancellationToken)
        -> AssistantsResult<Thread>;

    async fn delete(
        &self,
        thread_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<DeletionStatus>;
}

pub struct ThreadServiceImpl {
    context: ApiContext,
}

impl ThreadServiceImpl {
    pub fn new(transport: RetryingTransport, auth_manager: Arc<dyn AuthManager>) -> Self {
        Self {
            context: ApiContext::new(transport, auth_manager),
        }
    }
}

#[async_trait]
impl ThreadService for ThreadServiceImpl {
    async fn create(
        &self,
        request: CreateThreadRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Thread> {
        let request = HttpRequest::post("/threads")
            .json(&request)?
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn retrieve(
        &self,
        thread_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Thread> {
        let request = HttpRequest::get(format!("/threads/{}", thread_id)).with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn delete(
        &self,
        thread_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<DeletionStatus> {
        let request =
            HttpRequest::delete(format!("/threads/{}", thread_id)).with_cancellation(cancel);
        self.context.request(request).await
    }
}
