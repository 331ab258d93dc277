//! Run poller: drives a run to a terminal status.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::errors::{AssistantsError, AssistantsResult, RunFailure};
use crate::services::assistants::{Run, RunDisposition, RunService, RunStatus, ToolCall, ToolOutput};

#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Fixed pause between fetches while the run is still in progress.
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

/// Produces outputs for the tool calls of a run paused in `requires_action`.
#[async_trait]
pub trait ToolCallHandler: Send + Sync {
    async fn handle(&self, run: &Run, calls: &[ToolCall]) -> AssistantsResult<Vec<ToolOutput>>;
}

pub struct RunPoller {
    runs: Arc<dyn RunService>,
    config: PollerConfig,
}

impl RunPoller {
    pub fn new(runs: Arc<dyn RunService>, config: PollerConfig) -> Self {
        Self { runs, config }
    }

    /// Polls until the run reaches a terminal status and returns the final
    /// snapshot if it completed.
    ///
    /// `requires_action` is treated as progress; nothing is submitted.
    #[instrument(skip(self, cancel))]
    pub async fn wait_for_run(
        &self,
        thread_id: &str,
        run_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run> {
        self.poll(thread_id, run_id, None, cancel).await
    }

    /// Like [`wait_for_run`](Self::wait_for_run), but answers each distinct
    /// `requires_action` request through `handler` and submits its outputs.
    #[instrument(skip(self, handler, cancel))]
    pub async fn wait_with_tool_handler(
        &self,
        thread_id: &str,
        run_id: &str,
        handler: &dyn ToolCallHandler,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run> {
        self.poll(thread_id, run_id, Some(handler), cancel).await
    }

    async fn poll(
        &self,
        thread_id: &str,
        run_id: &str,
        handler: Option<&dyn ToolCallHandler>,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run> {
        let mut fetches: u32 = 0;
        let mut answered: HashSet<Vec<String>> = HashSet::new();

        loop {
            if cancel.is_cancelled() {
                return Err(AssistantsError::Cancelled);
            }

            let run = self.runs.retrieve(thread_id, run_id, cancel).await?;
            fetches += 1;
            debug!(status = %run.status, fetches, "Observed run status");

            match run.status.disposition() {
                RunDisposition::Continue => {
                    if let (Some(handler), RunStatus::RequiresAction) = (handler, &run.status) {
                        let calls = run.pending_tool_calls();
                        let mut call_ids: Vec<String> =
                            calls.iter().map(|call| call.id.clone()).collect();
                        call_ids.sort();

                        if !call_ids.is_empty() && answered.insert(call_ids) {
                            let outputs = handler.handle(&run, calls).await?;
                            info!(outputs = outputs.len(), "Submitting tool outputs");
                            self.runs
                                .submit_tool_outputs(thread_id, run_id, outputs, cancel)
                                .await?;
                        }
                    }
                }
                RunDisposition::Succeeded => {
                    info!(fetches, "Run completed");
                    return Ok(run);
                }
                RunDisposition::Failed => {
                    let failure = match run.last_error {
                        Some(error) => RunFailure::Failed {
                            code: error.code,
                            message: error.message,
                        },
                        None => RunFailure::FailedWithoutDetails,
                    };
                    info!(error = %failure, "Run failed");
                    return Err(failure.into());
                }
                RunDisposition::Cancelled => {
                    return Err(RunFailure::Cancelled {
                        status: run.status.to_string(),
                    }
                    .into());
                }
                RunDisposition::Expired => return Err(RunFailure::Expired.into()),
                RunDisposition::Unknown => {
                    return Err(RunFailure::UnknownStatus(run.status.to_string()).into());
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AssistantsError::Cancelled),
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }
}
