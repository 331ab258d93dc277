//! Waiting for a vector store to finish indexing its files.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::errors::{AssistantsError, AssistantsResult, VectorStoreFailure};
use crate::services::assistants::{VectorStore, VectorStoreService, VectorStoreStatus};

#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Overall budget, measured from the first fetch.
    pub timeout: Duration,
    /// Upper bound on a single pause between fetches.
    pub max_delay: Duration,
    pub initial_delay: Duration,
}

impl WaitOptions {
    pub fn new(timeout: Duration, max_delay: Duration) -> Self {
        Self {
            timeout,
            max_delay,
            initial_delay: Duration::from_secs(1),
        }
    }

    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::new(Duration::from_secs(300), Duration::from_secs(30))
    }
}

/// Shortest pause between two fetches of the same store.
pub const MIN_POLL_DELAY: Duration = Duration::from_millis(100);

/// Doubling delays, starting at `initial` and never exceeding `max`.
/// Both bounds are raised to [`MIN_POLL_DELAY`].
#[derive(Debug, Clone)]
pub struct BackoffSchedule {
    next: Duration,
    max: Duration,
}

impl BackoffSchedule {
    pub fn new(initial: Duration, max: Duration) -> Self {
        let max = max.max(MIN_POLL_DELAY);
        Self {
            next: initial.clamp(MIN_POLL_DELAY, max),
            max,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = self.next.saturating_mul(2).min(self.max);
        delay
    }
}

impl Iterator for BackoffSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        Some(self.next_delay())
    }
}

pub struct VectorStoreWaiter {
    vector_stores: Arc<dyn VectorStoreService>,
}

impl VectorStoreWaiter {
    pub fn new(vector_stores: Arc<dyn VectorStoreService>) -> Self {
        Self { vector_stores }
    }

    /// Polls the store until it is `completed`.
    ///
    /// A `failed` store and an exhausted budget produce different
    /// [`VectorStoreFailure`] variants; fetch errors are returned as-is.
    #[instrument(skip(self, cancel))]
    pub async fn wait(
        &self,
        vector_store_id: &str,
        options: WaitOptions,
        cancel: &CancellationToken,
    ) -> AssistantsResult<VectorStore> {
        let started = Instant::now();
        let mut backoff = BackoffSchedule::new(options.initial_delay, options.max_delay);

        loop {
            if cancel.is_cancelled() {
                return Err(AssistantsError::Cancelled);
            }

            let store = self.vector_stores.retrieve(vector_store_id, cancel).await?;
            match store.status {
                VectorStoreStatus::Completed => {
                    info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        files = store.file_counts.completed,
                        "Vector store ready"
                    );
                    return Ok(store);
                }
                VectorStoreStatus::Failed => {
                    return Err(VectorStoreFailure::Failed {
                        id: vector_store_id.to_string(),
                    }
                    .into());
                }
                status => debug!(?status, "Vector store not ready"),
            }

            let elapsed = started.elapsed();
            if elapsed >= options.timeout {
                return Err(VectorStoreFailure::TimedOut {
                    id: vector_store_id.to_string(),
                    elapsed,
                }
                .into());
            }

            let delay = backoff.next_delay();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AssistantsError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
