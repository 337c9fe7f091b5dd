//! Programmatic configuration builder for endpoint tests

use std::net::SocketAddr;
use std::path::Path;

use reverie_config::{
    AsrConfig, AsrProviderType, ChatConfig, ChatProviderType, Config, HealthConfig, ServerConfig, TtsConfig,
    TtsProviderType,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                asr: None,
                chat: None,
                tts: None,
            },
        }
    }

    /// Enable transcription against a mock Hugging Face backend
    pub fn with_asr(self, base_url: &str) -> Self {
        self.with_asr_ceiling(base_url, 25)
    }

    /// Enable transcription with an explicit upload ceiling in MiB
    pub fn with_asr_ceiling(mut self, base_url: &str, max_upload_mb: u64) -> Self {
        self.config.asr = Some(AsrConfig {
            provider_type: AsrProviderType::HfInference,
            api_key: Some(SecretString::from("test-key")),
            base_url: Some(base_url.parse().expect("valid URL")),
            model: "openai/whisper-large-v3".to_owned(),
            timeout_seconds: 10,
            max_upload_mb,
            allowed_formats: vec!["audio/wav".to_owned(), "audio/mpeg".to_owned()],
        });
        self
    }

    /// Enable chat against a mock OpenAI-compatible backend
    pub fn with_chat(mut self, base_url: &str) -> Self {
        self.config.chat = Some(ChatConfig {
            provider_type: ChatProviderType::Openai,
            api_key: Some(SecretString::from("test-key")),
            base_url: Some(base_url.parse().expect("valid URL")),
            model: "gpt-4o-mini".to_owned(),
            temperature: 0.7,
            max_tokens: 500,
            memory_size: 5,
            timeout_seconds: 10,
        });
        self
    }

    /// Enable synthesis against a mock OpenAI-compatible backend,
    /// writing audio under the given directory
    pub fn with_tts(mut self, base_url: &str, audio_dir: &Path) -> Self {
        self.config.tts = Some(TtsConfig {
            provider_type: TtsProviderType::Openai,
            api_key: Some(SecretString::from("test-key")),
            base_url: Some(base_url.parse().expect("valid URL")),
            model: "tts-1".to_owned(),
            max_text_chars: 2000,
            timeout_seconds: 10,
            audio_dir: audio_dir.to_path_buf(),
            max_age_seconds: 3600,
            reap_interval_seconds: 600,
        });
        self
    }

    /// Disable the health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
