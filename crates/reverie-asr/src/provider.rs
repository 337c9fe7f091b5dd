pub(crate) mod hf_inference;
pub(crate) mod whisper;

use async_trait::async_trait;

use crate::types::TranscriptionRequest;

/// Trait for ASR provider implementations
#[async_trait]
pub(crate) trait AsrProvider: Send + Sync {
    /// Transcribe audio to raw text
    ///
    /// Returns the provider's text as-is; trimming and emptiness checks
    /// happen in the server layer.
    async fn transcribe(&self, request: &TranscriptionRequest) -> crate::error::Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
