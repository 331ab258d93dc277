use crate::errors::categories::{
    AuthenticationError, ConfigurationError, NetworkError, RateLimitError, RunFailure,
    ServerError, ValidationError, VectorStoreFailure,
};
use crate::transport::TransportError;
use thiserror::Error;

pub type AssistantsResult<T> = Result<T, AssistantsError>;

#[derive(Error, Debug)]
pub enum AssistantsError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("Request error: {status_code} - {message}")]
    Request {
        status_code: u16,
        message: String,
        error_type: Option<String>,
        error_code: Option<String>,
    },

    #[error("failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: TransportError,
    },

    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Run(#[from] RunFailure),

    #[error(transparent)]
    VectorStore(#[from] VectorStoreFailure),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl AssistantsError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AssistantsError::Cancelled)
    }

    pub fn is_authentication_error(&self) -> bool {
        matches!(self, AssistantsError::Authentication(_))
    }

    pub fn is_rate_limit_error(&self) -> bool {
        matches!(self, AssistantsError::RateLimit(_))
    }

    /// True for a vector store wait that ran out of time, as opposed to a
    /// store the server reported as failed.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            AssistantsError::VectorStore(VectorStoreFailure::TimedOut { .. })
        )
    }

    pub fn run_failure(&self) -> Option<&RunFailure> {
        match self {
            AssistantsError::Run(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            AssistantsError::Request { error_code, .. }
            | AssistantsError::Validation(ValidationError::BadRequest { error_code, .. }) => {
                error_code.as_deref()
            }
            AssistantsError::Run(RunFailure::Failed { code, .. }) => Some(code.as_str()),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            AssistantsError::Request { status_code, .. } => Some(*status_code),
            AssistantsError::Authentication(error) => error.status_code(),
            AssistantsError::Validation(ValidationError::BadRequest { .. }) => Some(400),
            AssistantsError::RateLimit(_) => Some(429),
            AssistantsError::Network(NetworkError::ResponseInterrupted { status, .. }) => {
                Some(*status)
            }
            AssistantsError::Server(ServerError::InternalError(_)) => Some(500),
            AssistantsError::Server(ServerError::BadGateway(_)) => Some(502),
            AssistantsError::Server(ServerError::ServiceUnavailable(_)) => Some(503),
            AssistantsError::Server(ServerError::GatewayTimeout(_)) => Some(504),
            _ => None,
        }
    }
}

impl From<TransportError> for AssistantsError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connection { message } => {
                AssistantsError::Network(NetworkError::ConnectionFailed(message))
            }
            TransportError::Timeout { timeout } => AssistantsError::Network(
                NetworkError::ConnectionTimeout(format!("no response after {:?}", timeout)),
            ),
            TransportError::Tls { message } => {
                AssistantsError::Network(NetworkError::TlsError(message))
            }
            TransportError::InvalidResponse { message } => {
                AssistantsError::Network(NetworkError::RequestFailed(message))
            }
            TransportError::BodyRead { status, message } => AssistantsError::Network(
                NetworkError::ResponseInterrupted { status, message },
            ),
        }
    }
}

impl From<serde_json::Error> for AssistantsError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            AssistantsError::Deserialization(err.to_string())
        } else {
            AssistantsError::Serialization(err.to_string())
        }
    }
}

impl From<url::ParseError> for AssistantsError {
    fn from(err: url::ParseError) -> Self {
        AssistantsError::Configuration(ConfigurationError::InvalidBaseUrl(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_status_code() {
        let request_error = AssistantsError::Request {
            status_code: 404,
            message: "Not found".to_string(),
            error_type: None,
            error_code: None,
        };
        assert_eq!(request_error.status_code(), Some(404));
    }

    #[test]
    fn test_timeout_is_distinct_from_store_failure() {
        let timed_out = AssistantsError::from(VectorStoreFailure::TimedOut {
            id: "vs_1".to_string(),
            elapsed: Duration::from_secs(10),
        });
        let failed = AssistantsError::from(VectorStoreFailure::Failed {
            id: "vs_1".to_string(),
        });

        assert!(timed_out.is_timeout());
        assert!(!failed.is_timeout());
    }

    #[test]
    fn test_retries_exhausted_wraps_last_transport_error() {
        let error = AssistantsError::RetriesExhausted {
            attempts: 5,
            source: TransportError::Connection {
                message: "connection refused".to_string(),
            },
        };

        assert!(error.to_string().contains("failed after 5 attempts"));
        assert!(error.to_string().contains("connection refused"));
        let source = std::error::Error::source(&error).map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("Connection error: connection refused")
        );
    }

    #[test]
    fn test_transport_error_maps_to_network() {
        let error = AssistantsError::from(TransportError::Timeout {
            timeout: Duration::from_secs(3),
        });
        assert!(matches!(
            error,
            AssistantsError::Network(NetworkError::ConnectionTimeout(_))
        ));
    }
}
