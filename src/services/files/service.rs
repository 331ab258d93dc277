use crate::auth::AuthManager;
use crate::errors::{AssistantsError, AssistantsResult, ValidationError};
use crate::services::files::validation::FileRequestValidator;
use crate::services::files::{FileObject, FilePurpose, FileUploadRequest};
use crate::services::ApiContext;
use crate::transport::{HttpRequest, MultipartPart, ResponseParser, RetryingTransport};
use crate::types::{DeletionStatus, ListResponse};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[async_trait]
pub trait FileService: Send + Sync {
    async fn list(
        &self,
        purpose: Option<FilePurpose>,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<FileObject>>;

    async fn upload(
        &self,
        request: FileUploadRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<FileObject>;

    async fn retrieve(&self, file_id: &str, cancel: &CancellationToken)
        -> AssistantsResult<FileObject>;

    async fn delete(
        &self,
        file_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<DeletionStatus>;

    /// Downloads file content. Files uploaded with purpose `assistants`
    /// cannot be downloaded and are rejected before the download request.
    async fn content(&self, file_id: &str, cancel: &CancellationToken) -> AssistantsResult<Bytes>;
}

pub struct FileServiceImpl {
    context: ApiContext,
}

impl FileServiceImpl {
    pub fn new(transport: RetryingTransport, auth_manager: Arc<dyn AuthManager>) -> Self {
        Self {
            context: ApiContext::new(transport, auth_manager),
        }
    }
}

fn content_type_for(extension: &str) -> String {
    match extension {
        "pdf" => mime::APPLICATION_PDF.to_string(),
        "json" => mime::APPLICATION_JSON.to_string(),
        "txt" => mime::TEXT_PLAIN_UTF_8.to_string(),
        "md" => "text/markdown".to_string(),
        _ => mime::APPLICATION_OCTET_STREAM.to_string(),
    }
}

#[async_trait]
impl FileService for FileServiceImpl {
    async fn list(
        &self,
        purpose: Option<FilePurpose>,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<FileObject>> {
        let path = match purpose {
            Some(p) => format!("/files?purpose={}", p.as_str()),
            None => "/files".to_string(),
        };
        self.context
            .request(HttpRequest::get(path).with_cancellation(cancel))
            .await
    }

    async fn upload(
        &self,
        request: FileUploadRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<FileObject> {
        FileRequestValidator::validate(&request)?;

        let filename = request.generated_filename();
        info!(
            filename = %filename,
            purpose = %request.purpose,
            bytes = request.data.len(),
            "Uploading file"
        );

        let parts = vec![
            MultipartPart::File {
                name: "file".to_string(),
                filename,
                content_type: content_type_for(&request.extension),
                data: request.data,
            },
            MultipartPart::Text {
                name: "purpose".to_string(),
                value: request.purpose.to_string(),
            },
        ];

        let http_request = HttpRequest::post("/files")
            .multipart(parts)
            .with_cancellation(cancel);
        self.context.request(http_request).await
    }

    async fn retrieve(
        &self,
        file_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<FileObject> {
        let request = HttpRequest::get(format!("/files/{}", file_id)).with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn delete(
        &self,
        file_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<DeletionStatus> {
        let request = HttpRequest::delete(format!("/files/{}", file_id)).with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn content(&self, file_id: &str, cancel: &CancellationToken) -> AssistantsResult<Bytes> {
        let metadata = self.retrieve(file_id, cancel).await?;
        if metadata.purpose == FilePurpose::Assistants.as_str() {
            return Err(AssistantsError::Validation(ValidationError::InvalidRequest(
                format!(
                    "file {} has purpose 'assistants' and cannot be downloaded",
                    file_id
                ),
            )));
        }

        let request =
            HttpRequest::get(format!("/files/{}/content", file_id)).with_cancellation(cancel);
        let response = self.context.execute(request).await?;
        ResponseParser::parse_bytes(response)
    }
}
