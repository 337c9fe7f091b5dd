use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Rough speech rate used for the duration estimate, chars per second
const SPEECH_CHARS_PER_SECOND: f64 = 15.0;

/// Speech synthesis request
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize into speech
    pub text: String,
}

/// Completed synthesis: audio bytes plus the file they were saved as
#[derive(Debug)]
pub struct Synthesis {
    /// Raw WAV audio
    pub audio: Vec<u8>,
    /// Filename under the audio directory
    pub filename: String,
    /// Character count of the synthesized text
    pub text_chars: usize,
}

/// Metadata response for the JSON synthesis variant
#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesisMetadata {
    /// URL the generated audio is served at
    pub audio_url: String,
    /// Rough duration estimate in seconds
    pub duration: f64,
    /// Audio container format
    pub format: String,
    /// When the synthesis completed
    pub timestamp: Timestamp,
}

impl Synthesis {
    /// Convert into a binary audio HTTP response
    pub fn into_audio_response(self) -> axum::response::Response {
        axum::response::Response::builder()
            .header(http::header::CONTENT_TYPE, "audio/wav")
            .header(
                http::header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .body(axum::body::Body::from(self.audio))
            .unwrap_or_else(|_| {
                axum::response::Response::builder()
                    .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                    .body(axum::body::Body::empty())
                    .expect("empty response body")
            })
    }

    /// Convert into the JSON metadata variant
    pub fn into_metadata(self) -> SynthesisMetadata {
        #[allow(clippy::cast_precision_loss)]
        let estimate = self.text_chars as f64 / SPEECH_CHARS_PER_SECOND;

        SynthesisMetadata {
            audio_url: format!("/audio/{}", self.filename),
            duration: (estimate * 10.0).round() / 10.0,
            format: "wav".to_owned(),
            timestamp: Timestamp::now(),
        }
    }
}
