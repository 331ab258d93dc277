use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    #[error("Invalid API key format: {0}")]
    InvalidApiKeyFormat(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid retry configuration: {0}")]
    InvalidRetryConfig(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Error, Debug, Clone)]
pub enum AuthenticationError {
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("Expired API key: {0}")]
    ExpiredApiKey(String),

    #[error("Insufficient permissions: {0}")]
    InsufficientPermissions(String),

    #[error("Invalid organization ID: {0}")]
    InvalidOrganizationId(String),

    #[error("Invalid project ID: {0}")]
    InvalidProjectId(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl AuthenticationError {
    /// HTTP status the server answered with, for errors that came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AuthenticationError::InvalidApiKey(_) | AuthenticationError::ExpiredApiKey(_) => {
                Some(401)
            }
            AuthenticationError::InsufficientPermissions(_) | AuthenticationError::Forbidden(_) => {
                Some(403)
            }
            AuthenticationError::InvalidOrganizationId(_)
            | AuthenticationError::InvalidProjectId(_) => None,
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Invalid parameter: {parameter} - {reason}")]
    InvalidParameter { parameter: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Unsupported file type '.{extension}' for {file}; supported types: .pdf, .txt, .json, .md")]
    UnsupportedFileType { file: String, extension: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The server rejected the request with 400.
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        error_code: Option<String>,
    },
}

#[derive(Error, Debug, Clone)]
pub enum RateLimitError {
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded { message: String },

    #[error("Too many requests: {message}")]
    TooManyRequests {
        message: String,
        retry_after_secs: Option<u64>,
    },
}

impl RateLimitError {
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            RateLimitError::TooManyRequests {
                retry_after_secs, ..
            } => *retry_after_secs,
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    #[error("TLS error: {0}")]
    TlsError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response interrupted after status {status}: {message}")]
    ResponseInterrupted { status: u16, message: String },
}

#[derive(Error, Debug, Clone)]
pub enum ServerError {
    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),
}

/// Terminal outcomes of a run that the poller reports as failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunFailure {
    #[error("run failed: {code} - {message}")]
    Failed { code: String, message: String },

    #[error("run failed without error details")]
    FailedWithoutDetails,

    #[error("run ended with status: {status}")]
    Cancelled { status: String },

    #[error("run ended with status: expired")]
    Expired,

    #[error("unknown run status: {0}")]
    UnknownStatus(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorStoreFailure {
    #[error("vector store {id} failed to index")]
    Failed { id: String },

    #[error("timed out after {elapsed:?} waiting for vector store {id} to complete")]
    TimedOut { id: String, elapsed: Duration },
}
