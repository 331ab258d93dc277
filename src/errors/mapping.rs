use crate::errors::{
    AssistantsError, AuthenticationError, RateLimitError, ServerError, ValidationError,
};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Longest slice of a non-JSON error body kept in error messages.
pub const MAX_BODY_EXCERPT: usize = 512;

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
    pub param: Option<String>,
}

pub struct ErrorMapper;

impl ErrorMapper {
    /// Maps HTTP status code and error response to AssistantsError
    pub fn map_status_code(
        status_code: u16,
        error_response: Option<ApiErrorResponse>,
        body_excerpt: &str,
    ) -> AssistantsError {
        let error_detail = error_response.map(|r| r.error);
        let message = error_detail
            .as_ref()
            .map(|d| d.message.clone())
            .unwrap_or_else(|| {
                if body_excerpt.is_empty() {
                    format!("HTTP error: {}", status_code)
                } else {
                    format!("HTTP error: {}, body: '{}'", status_code, body_excerpt)
                }
            });
        let error_type = error_detail.as_ref().and_then(|d| d.error_type.clone());
        let error_code = error_detail.as_ref().and_then(|d| d.code.clone());

        match status_code {
            400 => AssistantsError::Validation(ValidationError::BadRequest {
                message,
                error_code,
            }),
            401 => {
                if message.contains("expired") {
                    AssistantsError::Authentication(AuthenticationError::ExpiredApiKey(message))
                } else {
                    AssistantsError::Authentication(AuthenticationError::InvalidApiKey(message))
                }
            }
            403 => {
                if message.contains("permission") {
                    AssistantsError::Authentication(AuthenticationError::InsufficientPermissions(
                        message,
                    ))
                } else {
                    AssistantsError::Authentication(AuthenticationError::Forbidden(message))
                }
            }
            429 => AssistantsError::RateLimit(RateLimitError::RateLimitExceeded { message }),
            500 => AssistantsError::Server(ServerError::InternalError(message)),
            502 => AssistantsError::Server(ServerError::BadGateway(message)),
            503 => AssistantsError::Server(ServerError::ServiceUnavailable(message)),
            504 => AssistantsError::Server(ServerError::GatewayTimeout(message)),
            _ => AssistantsError::Request {
                status_code,
                message,
                error_type,
                error_code,
            },
        }
    }

    /// Creates an error from response components
    pub fn from_response(status: u16, headers: &HeaderMap, body: &[u8]) -> AssistantsError {
        let error_response: Option<ApiErrorResponse> = serde_json::from_slice(body).ok();
        let excerpt = Self::body_excerpt(body);

        let error = Self::map_status_code(status, error_response, &excerpt);

        if status == 429 {
            if let Some(retry_after) = Self::extract_retry_after(headers) {
                let message = match &error {
                    AssistantsError::RateLimit(RateLimitError::RateLimitExceeded { message }) => {
                        message.clone()
                    }
                    _ => "Rate limit exceeded".to_string(),
                };
                return AssistantsError::RateLimit(RateLimitError::TooManyRequests {
                    message,
                    retry_after_secs: Some(retry_after),
                });
            }
        }

        error
    }

    /// Extracts retry-after header value in seconds
    pub fn extract_retry_after(headers: &HeaderMap) -> Option<u64> {
        headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())
    }

    /// Lossy UTF-8 view of the body, cut on a character boundary.
    pub fn body_excerpt(body: &[u8]) -> String {
        let text = String::from_utf8_lossy(body);
        let text = text.trim();
        if text.len() <= MAX_BODY_EXCERPT {
            return text.to_string();
        }
        let mut end = MAX_BODY_EXCERPT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}
