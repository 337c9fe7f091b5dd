use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Buffered audio upload awaiting transcription
#[derive(Debug)]
pub struct TranscriptionRequest {
    /// Raw audio data
    pub audio: Vec<u8>,
    /// Original filename
    pub filename: String,
    /// Declared content type of the audio file
    pub content_type: String,
}

/// Transcription result returned to the client
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Transcribed text, trimmed and non-empty
    pub text: String,
    /// Language code of the transcript
    pub language: String,
    /// When the transcription completed
    pub timestamp: Timestamp,
}
