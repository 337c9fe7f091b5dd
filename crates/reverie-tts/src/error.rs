use axum::response::IntoResponse;
use http::StatusCode;
use reverie_core::{ErrorBody, HttpError};
use thiserror::Error;

/// Convenience alias for TTS results
pub type Result<T> = std::result::Result<T, TtsError>;

/// Errors that can occur during speech synthesis
#[derive(Debug, Error)]
pub enum TtsError {
    /// Input text is empty or all-whitespace
    #[error("text cannot be empty")]
    EmptyText,

    /// Input text exceeds the configured character ceiling
    #[error("text too long: {actual} chars, maximum: {max} chars")]
    TextTooLong { actual: usize, max: usize },

    /// Remote endpoint returned zero audio bytes
    #[error("synthesis returned empty audio")]
    EmptyAudio,

    /// Remote endpoint failed or timed out
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Generated audio could not be written to disk
    #[error("failed to save audio: {0}")]
    WriteFailed(String),

    /// Provider misconfiguration caught at startup
    #[error("config error: {0}")]
    Config(String),
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyText | Self::TextTooLong { .. } => StatusCode::BAD_REQUEST,
            Self::EmptyAudio | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::WriteFailed(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::EmptyText | Self::TextTooLong { .. } => "invalid_request_error",
            Self::EmptyAudio | Self::Upstream(_) => "upstream_error",
            Self::WriteFailed(_) | Self::Config(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::EmptyAudio | Self::Upstream(_) => "text-to-speech conversion failed, please try again".to_owned(),
            Self::WriteFailed(_) | Self::Config(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), axum::Json(ErrorBody::from_error(&self))).into_response()
    }
}
