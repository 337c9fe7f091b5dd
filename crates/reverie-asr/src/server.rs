use std::time::Duration;

use jiff::Timestamp;
use reverie_config::{AsrConfig, AsrProviderType};
use secrecy::SecretString;

use crate::{
    error::AsrError,
    provider::{AsrProvider, hf_inference::HfInferenceProvider, whisper::WhisperProvider},
    types::{TranscriptionRequest, TranscriptionResponse},
    validate::UploadLimits,
};

/// Whisper auto-detects the spoken language, but the inference APIs do
/// not report the detection reliably, so the result always carries this
/// default. Known limitation.
const DEFAULT_LANGUAGE: &str = "en";

/// Headroom over the configured ceiling for multipart framing, so an
/// upload exactly at the ceiling still fits through the transport cap
const BODY_OVERHEAD_BYTES: u64 = 1 << 20;

/// ASR server wrapping the configured provider behind upload validation
pub struct Server {
    provider: Box<dyn AsrProvider>,
    limits: UploadLimits,
}

impl Server {
    /// Validate the upload, transcribe it, and normalize the result
    ///
    /// Validation runs before any remote call; a rejected upload never
    /// reaches the provider.
    pub(crate) async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResponse> {
        self.limits.validate(&request.content_type, request.audio.len() as u64)?;

        let text = self.provider.transcribe(&request).await?;

        let text = text.trim();
        if text.is_empty() {
            tracing::warn!(provider = %self.provider.name(), "transcription returned empty text");
            return Err(AsrError::EmptyTranscript);
        }

        Ok(TranscriptionResponse {
            text: text.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            timestamp: Timestamp::now(),
        })
    }

    /// Provider name, surfaced by the health endpoint
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Transport-level body cap in bytes
    ///
    /// The configured upload ceiling plus framing headroom, so
    /// over-ceiling uploads are rejected by the validator with the
    /// actual size rather than cut off mid-stream.
    pub fn body_limit(&self) -> usize {
        usize::try_from(self.limits.max_bytes + BODY_OVERHEAD_BYTES).unwrap_or(usize::MAX)
    }
}

/// Builder for constructing the ASR server from configuration
pub struct AsrServerBuilder<'a> {
    config: &'a AsrConfig,
}

impl<'a> AsrServerBuilder<'a> {
    pub const fn new(config: &'a AsrConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let api_key = resolve_api_key(self.config)?;
        let base_url = self.config.base_url.as_ref().map(ToString::to_string);
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let model = self.config.model.clone();

        let provider: Box<dyn AsrProvider> = match self.config.provider_type {
            AsrProviderType::HfInference => Box::new(HfInferenceProvider::new(api_key, base_url, model, timeout)),
            AsrProviderType::Whisper => Box::new(WhisperProvider::new(api_key, base_url, model, timeout)),
        };

        tracing::debug!(provider = %provider.name(), model = %self.config.model, "ASR server initialized");

        Ok(Server {
            provider,
            limits: UploadLimits {
                allowed_formats: self.config.allowed_formats.clone(),
                max_bytes: self.config.max_upload_bytes(),
            },
        })
    }
}

fn resolve_api_key(config: &AsrConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| AsrError::Config("API key required for ASR provider".to_owned()))
}
