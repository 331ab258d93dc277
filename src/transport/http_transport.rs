use async_trait::async_trait;
use futures::StreamExt;
use http::HeaderMap;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use super::{HttpRequest, HttpResponse, RequestBody, StreamingResponse, TransportError};
use crate::client::AssistantsConfig;
use crate::errors::{AssistantsError, AssistantsResult, ConfigurationError};

/// Single-shot HTTP seam.
///
/// Implementations return `Ok` for any response the server produced,
/// whatever its status. `Err` is reserved for failures where no response
/// arrived at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;

    async fn send_streaming(
        &self,
        request: &HttpRequest,
    ) -> Result<StreamingResponse, TransportError>;
}

/// HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    default_timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a new ReqwestTransport from configuration
    pub fn new(config: &AssistantsConfig) -> AssistantsResult<Self> {
        let mut client_builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_connections)
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url.as_str()).map_err(|e| {
                AssistantsError::Configuration(ConfigurationError::HttpClient(format!(
                    "invalid proxy {}: {}",
                    proxy_url, e
                )))
            })?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder.build().map_err(|e| {
            AssistantsError::Configuration(ConfigurationError::HttpClient(e.to_string()))
        })?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            default_timeout: config.timeout,
        })
    }

    fn build_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn build(&self, request: &HttpRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let url = self.build_url(&request.path);
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(request.headers.clone())
            .timeout(timeout);

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(bytes.clone()),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        Ok(builder)
    }

    fn map_send_error(&self, request: &HttpRequest, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout: request.timeout.unwrap_or(self.default_timeout),
            }
        } else if e.is_connect() {
            let message = error_chain(&e);
            if message.contains("certificate") || message.to_lowercase().contains("tls") {
                TransportError::Tls { message }
            } else {
                TransportError::Connection { message }
            }
        } else {
            TransportError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .build(request)?
            .send()
            .await
            .map_err(|e| self.map_send_error(request, e))?;

        let status = response.status().as_u16();
        let headers: HeaderMap = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::BodyRead {
                status,
                message: e.to_string(),
            })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send_streaming(
        &self,
        request: &HttpRequest,
    ) -> Result<StreamingResponse, TransportError> {
        let response = self
            .build(request)?
            .send()
            .await
            .map_err(|e| self.map_send_error(request, e))?;

        let status = response.status().as_u16();
        let headers: HeaderMap = response.headers().clone();
        let stream = response.bytes_stream().map(move |chunk| {
            chunk.map_err(move |e| TransportError::BodyRead {
                status,
                message: e.to_string(),
            })
        });

        Ok(StreamingResponse {
            status,
            headers,
            stream: Box::pin(stream),
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url.as_str())
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

fn build_form(
    parts: &[super::MultipartPart],
) -> Result<reqwest::multipart::Form, TransportError> {
    let mut form = reqwest::multipart::Form::new();

    for part in parts {
        form = match part {
            super::MultipartPart::Text { name, value } => form.text(name.clone(), value.clone()),
            super::MultipartPart::File {
                name,
                filename,
                content_type,
                data,
            } => {
                let file_part = reqwest::multipart::Part::bytes(data.to_vec())
                    .file_name(filename.clone())
                    .mime_str(content_type)
                    .map_err(|e| TransportError::InvalidResponse {
                        message: format!("invalid content type {}: {}", content_type, e),
                    })?;
                form.part(name.clone(), file_part)
            }
        };
    }

    Ok(form)
}

fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
