//! Retrying request executor.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::errors::{AssistantsError, AssistantsResult};

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each further failure.
    #[serde(default = "default_base_delay")]
    pub base_delay: Duration,
    #[serde(default = "default_max_delay")]
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay: default_base_delay(),
            max_delay: default_max_delay(),
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Delay to wait after the zero-based `attempt` failed:
    /// `min(base_delay * 2^attempt, max_delay)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(30)
}

/// Sends requests through an [`HttpTransport`], retrying transport failures.
///
/// A response with any HTTP status ends the loop; only failures where no
/// response arrived are retried. A body that breaks off after the status
/// line is returned as is. Cancellation of the request's token is
/// observed before the first attempt, during each attempt and during every
/// backoff wait.
#[derive(Clone)]
pub struct RetryingTransport {
    inner: Arc<dyn HttpTransport>,
    config: RetryConfig,
}

impl RetryingTransport {
    pub fn new(inner: Arc<dyn HttpTransport>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// The underlying single-shot transport, for calls that must not retry.
    pub fn inner(&self) -> &Arc<dyn HttpTransport> {
        &self.inner
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: &HttpRequest) -> AssistantsResult<HttpResponse> {
        let cancel = request.cancellation();
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(AssistantsError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AssistantsError::Cancelled),
                outcome = self.inner.send(request) => outcome,
            };

            let err = match outcome {
                Ok(response) => return Ok(response),
                Err(err) if !err.is_retryable() => return Err(err.into()),
                Err(err) => err,
            };

            attempt += 1;
            if attempt >= self.config.max_attempts {
                return Err(AssistantsError::RetriesExhausted {
                    attempts: attempt,
                    source: err,
                });
            }

            let delay = self.config.delay_for(attempt - 1);
            warn!(
                attempt,
                max_attempts = self.config.max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Request failed, retrying"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AssistantsError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

impl std::fmt::Debug for RetryingTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
