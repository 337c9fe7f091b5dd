use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech-to-text configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AsrConfig {
    /// Provider protocol type
    #[serde(rename = "type")]
    pub provider_type: AsrProviderType,
    /// API key for the remote inference endpoint
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier sent to the provider
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Maximum accepted upload size in MiB
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: u64,
    /// Accepted audio MIME types
    #[serde(default = "default_allowed_formats")]
    pub allowed_formats: Vec<String>,
}

/// Supported ASR providers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsrProviderType {
    /// Hugging Face serverless inference API
    HfInference,
    /// OpenAI-compatible Whisper transcription API
    Whisper,
}

impl AsrConfig {
    /// Upload ceiling in bytes
    pub const fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
}

fn default_model() -> String {
    "openai/whisper-large-v3".to_owned()
}

const fn default_timeout() -> u64 {
    60
}

const fn default_max_upload_mb() -> u64 {
    25
}

fn default_allowed_formats() -> Vec<String> {
    ["audio/wav", "audio/mpeg", "audio/mp4", "audio/x-m4a"]
        .map(str::to_owned)
        .to_vec()
}
