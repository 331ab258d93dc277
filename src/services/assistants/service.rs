use crate::auth::AuthManager;
use crate::errors::AssistantsResult;
use crate::services::assistants::{Assistant, CreateAssistantRequest, ModifyAssistantRequest};
use crate::services::ApiContext;
use crate::transport::{HttpRequest, RetryingTransport};
use crate::types::{DeletionStatus, ListResponse, PaginationParams};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait AssistantService: Send + Sync {
    async fn create(
        &self,
        request: CreateAssistantRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Assistant>;

    async fn retrieve(
        &self,
        assistant_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Assistant>;

    async fn modify(
        &self,
        assistant_id: &str,
        request: ModifyAssistantRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Assistant>;

    async fn delete(
        &self,
        assistant_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<DeletionStatus>;

    async fn list(
        &self,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<Assistant>>;
}

pub struct AssistantServiceImpl {
    context: ApiContext,
}

impl AssistantServiceImpl {
    pub fn new(transport: RetryingTransport, auth_manager: Arc<dyn AuthManager>) -> Self {
        Self {
            context: ApiContext::new(transport, auth_manager),
        }
    }
}

#[async_trait]
impl AssistantService for AssistantServiceImpl {
    async fn create(
        &self,
        request: CreateAssistantRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Assistant> {
        let request = HttpRequest::post("/assistants")
            .json(&request)?
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn retrieve(
        &self,
        assistant_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Assistant> {
        let request =
            HttpRequest::get(format!("/assistants/{}", assistant_id)).with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn modify(
        &self,
        assistant_id: &str,
        request: ModifyAssistantRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Assistant> {
        let request = HttpRequest::post(format!("/assistants/{}", assistant_id))
            .json(&request)?
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn delete(
        &self,
        assistant_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<DeletionStatus> {
        let request =
            HttpRequest::delete(format!("/assistants/{}", assistant_id)).with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn list(
        &self,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<Assistant>> {
        let request =
            HttpRequest::get(params.apply_to("/assistants")).with_cancellation(cancel);
        self.context.request(request).await
    }
}
