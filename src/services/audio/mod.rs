mod service;
mod types;


pub use service::{AudioService, AudioServiceImpl, TRANSCRIPTION_TIMEOUT};
pub use types::{audio_content_type, TranscriptionRequest, DEFAULT_TRANSCRIPTION_MODEL};
