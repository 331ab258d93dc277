mod messages;
mod poller;
mod runs;
mod service;
mod stream;
mod threads;
mod types;
mod vector_store_waiter;
mod vector_stores;


pub use messages::{
    Attachment, CreateMessageRequest, ImageFile, Message, MessageContent, MessageRole,
    MessageService, MessageServiceImpl, TextContent, BUSY_THREAD_MARKER,
};
pub use poller::{PollerConfig, RunPoller, ToolCallHandler};
pub use runs::{
    CreateRunRequest, FunctionCall, RequiredAction, Run, RunDisposition, RunError, RunService,
    RunServiceImpl, RunStatus, RunStep, StepDetails, SubmitToolOutputsAction, ToolCall,
    ToolOutput,
};
pub use service::{AssistantService, AssistantServiceImpl};
pub use stream::{RunStream, RunStreamer};
pub use threads::{CreateThreadRequest, Thread, ThreadService, ThreadServiceImpl};
pub use types::{
    Assistant, AssistantTool, CodeInterpreterResources, CreateAssistantRequest,
    FileSearchConfig, FileSearchResources, FunctionDefinition, ModifyAssistantRequest,
    ToolResources,
};
pub use vector_store_waiter::{BackoffSchedule, VectorStoreWaiter, WaitOptions, MIN_POLL_DELAY};
pub use vector_stores::{
    CreateVectorStoreRequest, FileCounts, VectorStore, VectorStoreService,
    VectorStoreServiceImpl, VectorStoreStatus,
};
