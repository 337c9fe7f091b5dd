use axum::response::IntoResponse;
use http::StatusCode;
use reverie_core::{ErrorBody, HttpError};
use thiserror::Error;

/// Convenience alias for ASR results
pub type Result<T> = std::result::Result<T, AsrError>;

/// Errors that can occur during transcription
#[derive(Debug, Error)]
pub enum AsrError {
    /// Uploaded file has a content type outside the allow-set
    #[error("invalid audio format: {content_type}, allowed formats: {allowed}")]
    InvalidFormat {
        content_type: String,
        allowed: String,
    },

    /// Uploaded file exceeds the configured size ceiling
    #[error("file too large: {actual_mb:.1}MB, maximum allowed: {max_mb}MB")]
    TooLarge { actual_mb: f64, max_mb: u64 },

    /// Uploaded file contains no bytes
    #[error("empty audio file")]
    EmptyUpload,

    /// Multipart form was malformed or missing the audio field
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Remote endpoint produced no usable text
    #[error("transcription returned empty text")]
    EmptyTranscript,

    /// Remote endpoint failed or timed out
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Provider misconfiguration caught at startup
    #[error("config error: {0}")]
    Config(String),
}

impl HttpError for AsrError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFormat { .. } | Self::EmptyUpload | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::EmptyTranscript | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidFormat { .. } | Self::TooLarge { .. } | Self::EmptyUpload | Self::InvalidRequest(_) => {
                "invalid_request_error"
            }
            Self::EmptyTranscript | Self::Upstream(_) => "upstream_error",
            Self::Config(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::EmptyTranscript | Self::Upstream(_) => "audio transcription failed, please try again".to_owned(),
            Self::Config(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AsrError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), axum::Json(ErrorBody::from_error(&self))).into_response()
    }
}
