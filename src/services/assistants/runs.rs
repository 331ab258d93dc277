use crate::auth::AuthManager;
use crate::errors::AssistantsResult;
use crate::services::assistants::AssistantTool;
use crate::services::ApiContext;
use crate::transport::{HttpRequest, RetryingTransport};
use crate::types::{ListResponse, PaginationParams};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    pub thread_id: String,
    pub assistant_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    #[serde(default)]
    pub last_error: Option<RunError>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub started_at: Option<i64>,
    #[serde(default)]
    pub cancelled_at: Option<i64>,
    #[serde(default)]
    pub failed_at: Option<i64>,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

impl Run {
    /// Tool calls the server is waiting on, if the run is paused for them.
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        self.required_action
            .as_ref()
            .map(|action| action.submit_tool_outputs.tool_calls.as_slice())
            .unwrap_or_default()
    }
}

/// Server-reported run status.
///
/// Values outside the documented set are kept verbatim in `Unknown` so they
/// can be reported rather than silently treated as progress.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Expired,
    Unknown(String),
}

/// What an observer should do after seeing a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDisposition {
    Continue,
    Succeeded,
    Failed,
    Cancelled,
    Expired,
    Unknown,
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Expired => "expired",
            RunStatus::Unknown(raw) => raw,
        }
    }

    pub fn disposition(&self) -> RunDisposition {
        match self {
            RunStatus::Queued | RunStatus::InProgress | RunStatus::RequiresAction => {
                RunDisposition::Continue
            }
            RunStatus::Completed => RunDisposition::Succeeded,
            RunStatus::Failed => RunDisposition::Failed,
            RunStatus::Cancelled => RunDisposition::Cancelled,
            RunStatus::Expired => RunDisposition::Expired,
            RunStatus::Cancelling | RunStatus::Unknown(_) => RunDisposition::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.disposition() != RunDisposition::Continue
    }
}

impl From<String> for RunStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "requires_action" => RunStatus::RequiresAction,
            "cancelling" => RunStatus::Cancelling,
            "cancelled" => RunStatus::Cancelled,
            "failed" => RunStatus::Failed,
            "completed" => RunStatus::Completed,
            "expired" => RunStatus::Expired,
            _ => RunStatus::Unknown(raw),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub submit_tool_outputs: SubmitToolOutputsAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitToolOutputsAction {
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments as produced by the model.
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

impl ToolOutput {
    pub fn new(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SubmitToolOutputsRequest<'a> {
    tool_outputs: &'a [ToolOutput],
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRunRequest {
    pub assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AssistantTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl CreateRunRequest {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            model: None,
            instructions: None,
            additional_instructions: None,
            tools: None,
            metadata: None,
            stream: None,
        }
    }

    pub fn with_additional_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.additional_instructions = Some(instructions.into());
        self
    }

    pub(crate) fn streaming(mut self) -> Self {
        self.stream = Some(true);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStep {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub assistant_id: String,
    #[serde(default)]
    pub thread_id: String,
    pub run_id: String,
    #[serde(rename = "type", default)]
    pub step_type: String,
    pub status: String,
    #[serde(default)]
    pub step_details: Option<StepDetails>,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDetails {
    #[serde(rename = "type")]
    pub detail_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_creation: Option<serde_json::Value>,
}

#[async_trait]
pub trait RunService: Send + Sync {
    async fn create(
        &self,
        thread_id: &str,
        request: CreateRunRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run>;

    async fn retrieve(
        &self,
        thread_id: &str,
        run_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run>;

    async fn cancel(
        &self,
        thread_id: &str,
        run_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run>;

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run>;

    async fn list(
        &self,
        thread_id: &str,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<Run>>;

    async fn list_steps(
        &self,
        thread_id: &str,
        run_id: &str,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<RunStep>>;
}

pub struct RunServiceImpl {
    context: ApiContext,
}

impl RunServiceImpl {
    pub fn new(transport: RetryingTransport, auth_manager: Arc<dyn AuthManager>) -> Self {
        Self {
            context: ApiContext::new(transport, auth_manager),
        }
    }
}

#[async_trait]
impl RunService for RunServiceImpl {
    async fn create(
        &self,
        thread_id: &str,
        request: CreateRunRequest,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run> {
        let request = HttpRequest::post(format!("/threads/{}/runs", thread_id))
            .json(&request)?
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn retrieve(
        &self,
        thread_id: &str,
        run_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run> {
        let request = HttpRequest::get(format!("/threads/{}/runs/{}", thread_id, run_id))
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn cancel(
        &self,
        thread_id: &str,
        run_id: &str,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run> {
        let request = HttpRequest::post(format!("/threads/{}/runs/{}/cancel", thread_id, run_id))
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
        cancel: &CancellationToken,
    ) -> AssistantsResult<Run> {
        let body = SubmitToolOutputsRequest {
            tool_outputs: &outputs,
        };
        let request = HttpRequest::post(format!(
            "/threads/{}/runs/{}/submit_tool_outputs",
            thread_id, run_id
        ))
        .json(&body)?
        .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn list(
        &self,
        thread_id: &str,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<Run>> {
        let request = HttpRequest::get(params.apply_to(&format!("/threads/{}/runs", thread_id)))
            .with_cancellation(cancel);
        self.context.request(request).await
    }

    async fn list_steps(
        &self,
        thread_id: &str,
        run_id: &str,
        params: PaginationParams,
        cancel: &CancellationToken,
    ) -> AssistantsResult<ListResponse<RunStep>> {
        let path = format!("/threads/{}/runs/{}/steps", thread_id, run_id);
        let request = HttpRequest::get(params.apply_to(&path)).with_cancellation(cancel);
        self.context.request(request).await
    }
}
