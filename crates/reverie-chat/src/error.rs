use axum::response::IntoResponse;
use http::StatusCode;
use reverie_core::{ErrorBody, HttpError};
use thiserror::Error;

/// Convenience alias for chat results
pub type Result<T> = std::result::Result<T, ChatError>;

/// Errors that can occur while generating a reply
#[derive(Debug, Error)]
pub enum ChatError {
    /// Message is empty or all-whitespace
    #[error("message cannot be empty")]
    EmptyMessage,

    /// Remote endpoint produced no usable text
    #[error("generated response is empty")]
    EmptyResponse,

    /// Remote endpoint failed or timed out
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Provider misconfiguration caught at startup
    #[error("config error: {0}")]
    Config(String),
}

impl HttpError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyMessage => StatusCode::BAD_REQUEST,
            Self::EmptyResponse | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::EmptyMessage => "invalid_request_error",
            Self::EmptyResponse | Self::Upstream(_) => "upstream_error",
            Self::Config(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::EmptyResponse | Self::Upstream(_) => "chat response generation failed, please try again".to_owned(),
            Self::Config(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), axum::Json(ErrorBody::from_error(&self))).into_response()
    }
}
