//! Example: Stream an assistant's reply into a new thread
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! export ASSISTANT_ID=asst_...
//! cargo run --example stream_thread -- "Where is my order?"
//! ```

use integrations_openai_assistants::observability::{LogLevel, LoggingConfig};
use integrations_openai_assistants::prelude::*;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::new()
        .with_level(LogLevel::Info)
        .crate_only(true)
        .init()?;

    let assistant_id = std::env::var("ASSISTANT_ID")?;
    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "What can you help me with?".to_string());

    let client = AssistantsClientBuilder::new().from_env()?.build()?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let thread = client
        .threads()
        .create(CreateThreadRequest::default(), &cancel)
        .await?;
    println!("Thread: {}\n", thread.id);

    let mut stream = client
        .run_streamer()
        .stream(&thread.id, &assistant_id, &question, &cancel);

    let mut stdout = std::io::stdout();
    while let Some(fragment) = stream.text.recv().await {
        print!("{}", fragment);
        stdout.flush()?;
    }
    println!();

    if let Some(error) = stream.errors.recv().await {
        eprintln!("Stream failed: {}", error);
    }

    Ok(())
}
