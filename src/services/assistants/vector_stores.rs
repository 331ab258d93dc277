use crate::auth::AuthManager;
use crate::errors::{AssistantsError, AssistantsResult, ValidationError};
use crate::services::files::{extension_of, is_supported_extension, FileService};
use crate::services::ApiContext;
use crate::transport::{HttpRequest, RetryingTransport};
use crate::types::{DeletionStatus, ListResponse, PaginationParams};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStore {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub usage_bytes: u64,
    #[serde(default)]
    pub file_counts: FileCounts,
    pub status: VectorStoreStatus,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorStoreStatus {
    InProgress,
    Completed,
    Failed,
    Expired,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileCounts {
    pub in_progress: u32,
    pub completed: u32,
    pub failed: u32,
    pub cancelled: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVectorStoreRequest {
    pub name: String,
    pub file_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

impl CreateVectorStoreRequest {
    pub fn new(name: impl Into<String>, file_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            file_ids,
            metadata: None,
        }
    }
}

#[async_trait]
pub trait VectorStoreService: Send + Sync {
    /// Creates a store after checking that every file has a searchable
    /// extension.
    async fn create(
        &self,
        request: CreateVectorStoreRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<VectorStore>;

    async fn retrieve(
        &self,
        vector_store_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<VectorStore>;

    async fn delete(
        &self,
        vector_store_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<DeletionStatus>;

    async fn list(
        &self,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<VectorStore>>;
}

pub struct VectorStoreServiceImpl {
    context: ApiContext,
    files: Arc<dyn FileService>,
}

impl VectorStoreServiceImpl {
    pub fn new(
        transport: RetryingTransport,
        auth_manager: Arc<dyn AuthManager>,
        files: Arc<dyn FileService>,
    ) -> Self {
        Self {
            context: ApiContext::new(transport, auth_manager),
            files,
        }
    }

    async fn validate(
        &self,
        request: &CreateVectorStoreRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<()> {
        if request.name.trim().is_empty() {
            return Err(AssistantsError::Validation(
                ValidationError::MissingRequiredField("name".to_string()),
            ));
        }

        if request.file_ids.is_empty() {
            return Err(AssistantsError::Validation(
                ValidationError::MissingRequiredField("file_ids".to_string()),
            ));
        }

        for file_id in &request.file_ids {
            let file = self.files.retrieve(file_id, cancel).await?;
            let extension = extension_of(&file.filename);
            if !is_supported_extension(&extension) {
                return Err(AssistantsError::Validation(
                    ValidationError::UnsupportedFileType {
                        file: file.filename,
                        extension,
                    },
                ));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl VectorStoreService for VectorStoreServiceImpl {
    async fn create(
        &self,
        request: CreateVectorStoreRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<VectorStore> {
        self.validate(&request, cancel).await?;

        info!(
            name = %request.name,
            file_count = request.file_ids.len(),
            "Creating vector store"
        );

        let request = HttpRequest::post("/vector_stores")
            .json(&request)?
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn retrieve(
        &self,
        vector_store_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<VectorStore> {
        let request = HttpRequest::get(format!("/vector_stores/{}", vector_store_id))
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn delete(
        &self,
        vector_store_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<DeletionStatus> {
        let request = HttpRequest::delete(format!("/vector_stores/{}", vector_store_id))
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn list(
        &self,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<VectorStore>> {
        let request =
            HttpRequest::get(params.apply_to("/vector_stores")).with_cancellation(cancel);
        self.context.request(request).await
    }
}
