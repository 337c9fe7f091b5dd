use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The server layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    ///
    /// Upstream provider detail belongs in logs, never here.
    fn client_message(&self) -> String;
}

/// Wire shape for error responses
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error detail
    pub error: ErrorDetail,
}

/// Inner error object within an [`ErrorBody`]
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Message safe to expose to API consumers
    pub message: String,
    /// Machine-readable error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Always null, kept for OpenAI-style client compatibility
    pub code: Option<String>,
}

impl ErrorBody {
    /// Build the wire error body for a domain error
    pub fn from_error(error: &dyn HttpError) -> Self {
        Self {
            error: ErrorDetail {
                message: error.client_message(),
                error_type: error.error_type().to_owned(),
                code: None,
            },
        }
    }
}
