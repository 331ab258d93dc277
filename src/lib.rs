//! # OpenAI Assistants Client
//!
//! Async Rust client for the OpenAI Assistants API (v2): assistants,
//! threads, messages, runs, vector stores and files, plus the pieces needed
//! to drive a conversation to completion.
//!
//! - Every non-streaming call is retried on transport failures with capped
//!   exponential backoff. HTTP error statuses are returned, never retried.
//! - [`RunPoller`] waits for a run to reach a terminal status.
//! - [`RunStreamer`] delivers a run's reply as text fragments over a channel.
//! - [`VectorStoreWaiter`] waits for a vector store to finish indexing.
//! - Every operation takes a [`CancellationToken`] and stops promptly when
//!   it is cancelled.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_openai_assistants::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AssistantsClientBuilder::new().from_env()?.build()?;
//!     let cancel = CancellationToken::new();
//!
//!     let thread = client
//!         .threads()
//!         .create(CreateThreadRequest::default(), &cancel)
//!         .await?;
//!
//!     let reply = client
//!         .run_streamer()
//!         .stream(&thread.id, "asst_abc123", "Where is my order?", &cancel)
//!         .collect_text()
//!         .await?;
//!
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

#[cfg(test)]
pub mod mocks;
#[cfg(test)]
pub mod fixtures;

pub use client::{AssistantsClient, AssistantsClientBuilder, AssistantsClientImpl, AssistantsConfig};
pub use errors::{AssistantsError, AssistantsResult, RunFailure, VectorStoreFailure};
pub use tokio_util::sync::CancellationToken;

pub use services::{
    assistants::{
        Assistant, AssistantService, AssistantTool, CreateAssistantRequest, CreateMessageRequest,
        CreateRunRequest, CreateThreadRequest, CreateVectorStoreRequest, Message, MessageService,
        PollerConfig, Run, RunPoller, RunService, RunStatus, RunStream, RunStreamer, Thread,
        ThreadService, ToolCall, ToolCallHandler, ToolOutput, VectorStore, VectorStoreService,
        VectorStoreStatus, VectorStoreWaiter, WaitOptions,
    },
    audio::{AudioService, TranscriptionRequest},
    files::{FileObject, FilePurpose, FileService, FileUploadRequest},
};

pub mod prelude {
    pub use crate::client::{AssistantsClient, AssistantsClientBuilder, AssistantsConfig};
    pub use crate::errors::{AssistantsError, AssistantsResult};
    pub use crate::services::assistants::{
        AssistantService, CreateMessageRequest, CreateRunRequest, CreateThreadRequest,
        MessageService, RunService, ThreadService, ToolCallHandler, VectorStoreService,
        WaitOptions,
    };
    pub use crate::services::audio::AudioService;
    pub use crate::services::files::FileService;
    pub use tokio_util::sync::CancellationToken;
}
