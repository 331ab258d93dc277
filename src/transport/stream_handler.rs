//! Server-sent event framing for run streams.

use bytes::Bytes;
use serde::Deserialize;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use super::ByteStream;

/// Payload that terminates a stream.
pub const DONE_SENTINEL: &str = "[DONE]";

const DATA_FIELD: &str = "data:";
const MESSAGE_DELTA_OBJECT: &str = "thread.message.delta";

pub type SseLines = tokio::io::Lines<StreamReader<ByteStream, Bytes>>;

/// Splits a streaming body into lines without buffering the whole payload.
pub fn sse_lines(stream: ByteStream) -> SseLines {
    StreamReader::new(stream).lines()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// A `data:` field carrying an event payload.
    Data(&'a str),
    Done,
    /// Blank separators, comments and non-data fields such as `event:`.
    Ignored,
}

pub fn classify_line(line: &str) -> SseLine<'_> {
    let line = line.trim_end_matches('\r');
    let Some(payload) = line.strip_prefix(DATA_FIELD) else {
        return SseLine::Ignored;
    };
    let payload = payload.strip_prefix(' ').unwrap_or(payload);

    if payload == DONE_SENTINEL {
        SseLine::Done
    } else {
        SseLine::Data(payload)
    }
}

/// Why a data frame produced no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Malformed,
    /// Any event other than a message delta, e.g. `thread.run.step.created`.
    OtherObject(String),
    /// A message delta whose first content part is not text, or whose text
    /// is empty. Empty fragments are dropped rather than forwarded.
    NoText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    TextDelta(String),
    Skipped(SkipReason),
}

#[derive(Debug, Deserialize)]
struct DeltaEvent {
    #[serde(default)]
    object: String,
    #[serde(default)]
    delta: Option<MessageDelta>,
}

#[derive(Debug, Deserialize)]
struct MessageDelta {
    #[serde(default)]
    content: Vec<DeltaContent>,
}

#[derive(Debug, Deserialize)]
struct DeltaContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<DeltaText>,
}

#[derive(Debug, Deserialize)]
struct DeltaText {
    #[serde(default)]
    value: Option<String>,
}

/// Extracts the text fragment of a `thread.message.delta` payload.
pub fn parse_frame(payload: &str) -> StreamFrame {
    let event: DeltaEvent = match serde_json::from_str(payload) {
        Ok(event) => event,
        Err(_) => return StreamFrame::Skipped(SkipReason::Malformed),
    };

    if event.object != MESSAGE_DELTA_OBJECT {
        return StreamFrame::Skipped(SkipReason::OtherObject(event.object));
    }

    let text = event
        .delta
        .and_then(|delta| delta.content.into_iter().next())
        .filter(|content| content.kind == "text")
        .and_then(|content| content.text)
        .and_then(|text| text.value)
        .filter(|value| !value.is_empty());

    match text {
        Some(value) => StreamFrame::TextDelta(value),
        None => StreamFrame::Skipped(SkipReason::NoText),
    }
}
