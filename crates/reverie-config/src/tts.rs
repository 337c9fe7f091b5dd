use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Text-to-speech configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Provider protocol type
    #[serde(rename = "type")]
    pub provider_type: TtsProviderType,
    /// API key for the synthesis endpoint
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum input length in characters
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Directory for generated audio files
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
    /// Age after which generated audio files are reaped, in seconds
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
    /// Interval between background reap scans, in seconds
    #[serde(default = "default_reap_interval")]
    pub reap_interval_seconds: u64,
}

/// Supported TTS providers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsProviderType {
    /// Hugging Face serverless inference API
    HfInference,
    /// OpenAI-compatible speech API
    Openai,
}

fn default_model() -> String {
    "facebook/mms-tts-eng".to_owned()
}

const fn default_max_text_chars() -> usize {
    2000
}

const fn default_timeout() -> u64 {
    60
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("temp_audio")
}

const fn default_max_age() -> u64 {
    3600
}

const fn default_reap_interval() -> u64 {
    600
}
