pub(crate) mod hf_inference;
pub(crate) mod openai;

use async_trait::async_trait;

/// Trait for TTS provider implementations
#[async_trait]
pub(crate) trait TtsProvider: Send + Sync {
    /// Synthesize validated text into raw audio bytes
    async fn synthesize(&self, text: &str) -> crate::error::Result<Vec<u8>>;

    /// Get the provider name
    fn name(&self) -> &str;
}
