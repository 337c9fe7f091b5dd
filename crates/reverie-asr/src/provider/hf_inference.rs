use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{error::AsrError, http_client::http_client, types::TranscriptionRequest};

use super::AsrProvider;

const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co";

/// Hugging Face serverless inference ASR provider
pub(crate) struct HfInferenceProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

/// The inference API answers with either a structured object or a bare
/// JSON string depending on the model pipeline; both shapes are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HfTranscription {
    Object { text: String },
    Text(String),
}

impl HfTranscription {
    fn into_text(self) -> String {
        match self {
            Self::Object { text } | Self::Text(text) => text,
        }
    }
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
impl AsrProvider for HfInferenceProvider {
    async fn transcribe(&self, request: &TranscriptionRequest) -> crate::error::Result<String> {
        let url = format!("{}/models/{}", self.base_url.trim_end_matches('/'), self.model);

        tracing::debug!(model = %self.model, bytes = request.audio.len(), "HF inference ASR request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header("Content-Type", &request.content_type)
            .body(request.audio.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("HF inference request failed: {e}");
                AsrError::Upstream(format!("failed to send request to HF inference: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            tracing::error!("HF inference API error ({status}): {error_text}");
            return Err(AsrError::Upstream(format!("provider returned {status}: {error_text}")));
        }

        let result: HfTranscription = response.json().await.map_err(|e| {
            tracing::error!("failed to parse HF inference response: {e}");
            AsrError::Upstream(format!("failed to parse response: {e}"))
        })?;

        Ok(result.into_text())
    }

    fn name(&self) -> &str {
        "hf_inference"
    }
}
