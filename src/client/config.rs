use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::{AssistantsError, AssistantsResult, ConfigurationError};
use crate::transport::RetryConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantsConfig {
    #[serde(skip_serializing)]
    pub api_key: SecretString,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub organization_id: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    /// Per-request timeout for ordinary calls.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,

    /// Whole-response timeout for streamed runs, which stay open far longer
    /// than ordinary calls.
    #[serde(default = "default_stream_timeout")]
    pub stream_timeout: Duration,

    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default = "default_poll_interval")]
    pub poll_interval: Duration,

    /// Pause before the single retry of a message rejected because a run is
    /// still active on the thread.
    #[serde(default = "default_busy_thread_retry_delay")]
    pub busy_thread_retry_delay: Duration,
}

impl AssistantsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: default_base_url(),
            organization_id: None,
            project_id: None,
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            stream_timeout: default_stream_timeout(),
            max_connections: default_max_connections(),
            proxy: None,
            user_agent: default_user_agent(),
            retry: RetryConfig::default(),
            poll_interval: default_poll_interval(),
            busy_thread_retry_delay: default_busy_thread_retry_delay(),
        }
    }

    /// Creates a config from environment variables
    ///
    /// Reads the following environment variables:
    /// - OPENAI_API_KEY (required)
    /// - OPENAI_BASE_URL (optional, defaults to https://api.openai.com/v1)
    /// - OPENAI_ORGANIZATION_ID (optional)
    /// - OPENAI_PROJECT_ID (optional)
    pub fn from_env() -> AssistantsResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AssistantsError::Configuration(ConfigurationError::MissingApiKey(
                "OPENAI_API_KEY environment variable not found".to_string(),
            ))
        })?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            Url::parse(&base_url).map_err(|e| {
                AssistantsError::Configuration(ConfigurationError::InvalidBaseUrl(format!(
                    "Invalid OPENAI_BASE_URL: {}",
                    e
                )))
            })?;
            config.base_url = base_url;
        }

        if let Ok(org_id) = std::env::var("OPENAI_ORGANIZATION_ID") {
            config.organization_id = Some(org_id);
        }

        if let Ok(project_id) = std::env::var("OPENAI_PROJECT_ID") {
            config.project_id = Some(project_id);
        }

        Ok(config)
    }

    pub fn validate(&self) -> AssistantsResult<()> {
        let api_key = self.api_key.expose_secret();

        if api_key.is_empty() {
            return Err(AssistantsError::Configuration(
                ConfigurationError::MissingApiKey("API key is empty".to_string()),
            ));
        }

        if api_key.len() < 10 {
            return Err(AssistantsError::Configuration(
                ConfigurationError::InvalidApiKeyFormat("API key is too short".to_string()),
            ));
        }

        let url = Url::parse(&self.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AssistantsError::Configuration(
                ConfigurationError::InvalidBaseUrl(format!(
                    "unsupported scheme '{}'",
                    url.scheme()
                )),
            ));
        }

        for (name, value) in [
            ("timeout", self.timeout),
            ("stream_timeout", self.stream_timeout),
            ("poll_interval", self.poll_interval),
        ] {
            if value.is_zero() {
                return Err(AssistantsError::Configuration(
                    ConfigurationError::InvalidTimeout(format!("{} must be greater than 0", name)),
                ));
            }
        }

        if self.retry.max_attempts == 0 {
            return Err(AssistantsError::Configuration(
                ConfigurationError::InvalidRetryConfig(
                    "max_attempts must be at least 1".to_string(),
                ),
            ));
        }

        if self.retry.base_delay > self.retry.max_delay {
            return Err(AssistantsError::Configuration(
                ConfigurationError::InvalidRetryConfig(format!(
                    "base_delay {:?} exceeds max_delay {:?}",
                    self.retry.base_delay, self.retry.max_delay
                )),
            ));
        }

        Ok(())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_organization_id(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_busy_thread_retry_delay(mut self, delay: Duration) -> Self {
        self.busy_thread_retry_delay = delay;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_stream_timeout() -> Duration {
    Duration::from_secs(600)
}

fn default_max_connections() -> usize {
    100
}

fn default_user_agent() -> String {
    format!("integrations-openai-assistants/{}", env!("CARGO_PKG_VERSION"))
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_busy_thread_retry_delay() -> Duration {
    Duration::from_secs(5)
}
