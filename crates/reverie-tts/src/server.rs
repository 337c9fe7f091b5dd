use std::time::Duration;

use reverie_config::{TtsConfig, TtsProviderType};
use secrecy::SecretString;

use crate::{
    error::TtsError,
    provider::{TtsProvider, hf_inference::HfInferenceProvider, openai::OpenAiProvider},
    store::AudioStore,
    types::Synthesis,
    validate::validate_text,
};

/// TTS server wrapping the configured provider behind text validation
/// and the on-disk audio store
pub struct Server {
    provider: Box<dyn TtsProvider>,
    store: AudioStore,
    max_text_chars: usize,
}

impl Server {
    /// Validate the text, synthesize it, and persist the audio
    pub(crate) async fn synthesize(&self, text: &str) -> crate::error::Result<Synthesis> {
        let text = validate_text(text, self.max_text_chars)?;

        let audio = self.provider.synthesize(&text).await?;

        if audio.is_empty() {
            tracing::warn!(provider = %self.provider.name(), "synthesis returned empty audio");
            return Err(TtsError::EmptyAudio);
        }

        self.store.save(&text, &audio).await?;

        Ok(Synthesis {
            filename: AudioStore::filename_for(&text),
            text_chars: text.chars().count(),
            audio,
        })
    }

    /// The store backing this server, shared with the background reaper
    pub fn store(&self) -> &AudioStore {
        &self.store
    }

    /// Provider name, surfaced by the health endpoint
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a TtsConfig,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a TtsConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let api_key = resolve_api_key(self.config)?;
        let base_url = self.config.base_url.as_ref().map(ToString::to_string);
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let model = self.config.model.clone();

        let provider: Box<dyn TtsProvider> = match self.config.provider_type {
            TtsProviderType::HfInference => Box::new(HfInferenceProvider::new(api_key, base_url, model, timeout)),
            TtsProviderType::Openai => Box::new(OpenAiProvider::new(api_key, base_url, model, timeout)),
        };

        let store = AudioStore::open(self.config.audio_dir.clone())?;

        tracing::debug!(
            provider = %provider.name(),
            model = %self.config.model,
            audio_dir = %self.config.audio_dir.display(),
            "TTS server initialized"
        );

        Ok(Server {
            provider,
            store,
            max_text_chars: self.config.max_text_chars,
        })
    }
}

fn resolve_api_key(config: &TtsConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| TtsError::Config("API key required for TTS provider".to_owned()))
}
