//! Example: Start a run and answer its tool calls until it completes
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! export ASSISTANT_ID=asst_...
//! cargo run --example wait_for_run
//! ```

use async_trait::async_trait;
use integrations_openai_assistants::observability::{LogFormat, LoggingConfig};
use integrations_openai_assistants::prelude::*;
use integrations_openai_assistants::services::assistants::{Run, ToolCall, ToolOutput};

/// Answers every function call with a canned order status.
struct OrderStatus;

#[async_trait]
impl ToolCallHandler for OrderStatus {
    async fn handle(&self, _run: &Run, calls: &[ToolCall]) -> AssistantsResult<Vec<ToolOutput>> {
        Ok(calls
            .iter()
            .map(|call| {
                println!("Tool call {}({})", call.function.name, call.function.arguments);
                ToolOutput::new(call.id.as_str(), r#"{"status":"shipped"}"#)
            })
            .collect())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::new().with_format(LogFormat::Compact).init()?;

    let assistant_id = std::env::var("ASSISTANT_ID")?;
    let client = AssistantsClientBuilder::new().from_env()?.build()?;
    let cancel = CancellationToken::new();

    let thread = client
        .threads()
        .create(CreateThreadRequest::default(), &cancel)
        .await?;
    client
        .messages()
        .create(
            &thread.id,
            CreateMessageRequest::user("Has order 42 shipped yet?"),
            &cancel,
        )
        .await?;

    let run = client
        .runs()
        .create(&thread.id, CreateRunRequest::new(assistant_id), &cancel)
        .await?;

    match client
        .run_poller()
        .wait_with_tool_handler(&thread.id, &run.id, &OrderStatus, &cancel)
        .await
    {
        Ok(run) => println!("Run {} finished with status {}", run.id, run.status),
        Err(AssistantsError::Run(failure)) => eprintln!("Run did not complete: {}", failure),
        Err(other) => return Err(other.into()),
    }

    let messages = client
        .messages()
        .list(&thread.id, Default::default(), &cancel)
        .await?;
    for message in messages.data {
        println!("{:?}: {}", message.role, message.text());
    }

    Ok(())
}
