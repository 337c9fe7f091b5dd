use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{error::TtsError, http_client::http_client};

use super::TtsProvider;

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Voice used when the model does not carry one; the journaling client
/// only needs a single consistent voice
const DEFAULT_VOICE: &str = "alloy";

/// OpenAI-compatible speech provider
pub(crate) struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

#[derive(serde::Serialize)]
struct OpenAiSpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

impl OpenAiProvider {
    pub fn new(api_key: SecretString, base_url: Option<String>, model: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_owned()),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TtsProvider for OpenAiProvider {
    async fn synthesize(&self, text: &str) -> crate::error::Result<Vec<u8>> {
        let url = format!("{}/audio/speech", self.base_url.trim_end_matches('/'));

        tracing::debug!(model = %self.model, chars = text.len(), "OpenAI TTS request");

        let body = OpenAiSpeechRequest {
            model: &self.model,
            input: text,
            voice: DEFAULT_VOICE,
            response_format: "wav",
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI TTS request failed: {e}");
                TtsError::Upstream(format!("failed to send request to OpenAI TTS: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            tracing::error!("OpenAI TTS API error ({status}): {error_text}");
            return Err(TtsError::Upstream(format!("provider returned {status}: {error_text}")));
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("failed to read OpenAI TTS response body: {e}");
            TtsError::Upstream(format!("failed to read response body: {e}"))
        })?;

        Ok(audio.to_vec())
    }

    fn name(&self) -> &str {
        "openai"
    }
}
