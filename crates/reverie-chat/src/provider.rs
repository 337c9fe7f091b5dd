pub(crate) mod anthropic;
pub(crate) mod openai;

use async_trait::async_trait;

use crate::types::ChatEntry;

/// Generation parameters fixed at startup from configuration
#[derive(Debug, Clone)]
pub(crate) struct GenerationParams {
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens in the reply
    pub max_tokens: u32,
}

/// Trait for chat completion provider implementations
///
/// One variant per remote protocol, selected at startup by
/// configuration and injected into the orchestrator.
#[async_trait]
pub(crate) trait ChatProvider: Send + Sync {
    /// Generate a reply to the conversation
    ///
    /// `messages` is the full ordered conversation including the new
    /// user turn; `system` carries the persona instruction separately
    /// since protocols differ on where it goes.
    async fn generate(&self, system: &str, messages: &[ChatEntry]) -> crate::error::Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
