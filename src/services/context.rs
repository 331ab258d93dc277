use http::HeaderMap;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::auth::AuthManager;
use crate::errors::{AssistantsError, AssistantsResult};
use crate::transport::{
    HttpRequest, HttpResponse, ResponseParser, RetryingTransport, StreamingResponse,
};

/// Authenticated access to the API shared by every service.
#[derive(Clone)]
pub(crate) struct ApiContext {
    transport: RetryingTransport,
    auth_manager: Arc<dyn AuthManager>,
}

impl ApiContext {
    pub(crate) fn new(transport: RetryingTransport, auth_manager: Arc<dyn AuthManager>) -> Self {
        Self {
            transport,
            auth_manager,
        }
    }

    async fn authorize(&self, request: HttpRequest) -> AssistantsResult<HttpRequest> {
        let mut headers = HeaderMap::new();
        self.auth_manager.apply_auth(&mut headers).await?;
        Ok(request.with_headers(headers))
    }

    /// Sends through the retrying transport and decodes a 2xx JSON body.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> AssistantsResult<T> {
        let response = self.execute(request).await?;
        ResponseParser::parse_response(&response)
    }

    /// Sends through the retrying transport without interpreting the status.
    pub(crate) async fn execute(&self, request: HttpRequest) -> AssistantsResult<HttpResponse> {
        let request = self.authorize(request).await?;
        self.transport.execute(&request).await
    }

    /// One attempt, no retry, still bound to the request's cancellation.
    pub(crate) async fn send_once(&self, request: HttpRequest) -> AssistantsResult<HttpResponse> {
        let request = self.authorize(request).await?;
        let cancel = request.cancellation().clone();
        if cancel.is_cancelled() {
            return Err(AssistantsError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AssistantsError::Cancelled),
            outcome = self.transport.inner().send(&request) => outcome.map_err(AssistantsError::from),
        }
    }

    /// Opens a streamed response. Never retried: a second attempt after a
    /// partially delivered stream could start a duplicate run.
    pub(crate) async fn open_stream(
        &self,
        request: HttpRequest,
    ) -> AssistantsResult<StreamingResponse> {
        let request = self.authorize(request).await?;
        let cancel = request.cancellation().clone();
        if cancel.is_cancelled() {
            return Err(AssistantsError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AssistantsError::Cancelled),
            outcome = self.transport.inner().send_streaming(&request) => {
                outcome.map_err(AssistantsError::from)
            }
        }
    }
}
