use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{error::TtsError, http_client::http_client};

use super::TtsProvider;

const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co";

/// Hugging Face serverless inference TTS provider
pub(crate) struct HfInferenceProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

#[derive(serde::Serialize)]
struct HfSynthesisRequest<'a> {
    inputs: &'a str,
}

impl HfInferenceProvider {
    pub fn new(api_key: SecretString, base_url: Option<String>, model: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: base_url.unwrap_or_else(|| DEFAULT_HF_API_URL.to_owned()),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TtsProvider for HfInferenceProvider {
    async fn synthesize(&self, text: &str) -> crate::error::Result<Vec<u8>> {
        let url = format!("{}/models/{}", self.base_url.trim_end_matches('/'), self.model);

        tracing::debug!(model = %self.model, chars = text.len(), "HF inference TTS request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&HfSynthesisRequest { inputs: text })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("HF inference request failed: {e}");
                TtsError::Upstream(format!("failed to send request to HF inference: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            tracing::error!("HF inference API error ({status}): {error_text}");
            return Err(TtsError::Upstream(format!("provider returned {status}: {error_text}")));
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("failed to read HF inference response body: {e}");
            TtsError::Upstream(format!("failed to read response body: {e}"))
        })?;

        Ok(audio.to_vec())
    }

    fn name(&self) -> &str {
        "hf_inference"
    }
}
