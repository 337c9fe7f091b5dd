use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{error::AsrError, http_client::http_client, types::TranscriptionRequest};

use super::AsrProvider;

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible Whisper STT provider
pub(crate) struct WhisperProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
}

impl WhisperProvider {
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
impl AsrProvider for WhisperProvider {
    async fn transcribe(&self, request: &TranscriptionRequest) -> crate::error::Result<String> {
        let url = format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'));

        tracing::debug!(model = %self.model, bytes = request.audio.len(), "Whisper transcription request");

        let file_part = reqwest::multipart::Part::bytes(request.audio.clone())
            .file_name(request.filename.clone())
            .mime_str(&request.content_type)
            .map_err(|e| AsrError::Upstream(format!("invalid content type for upload: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Whisper request failed: {e}");
                AsrError::Upstream(format!("failed to send request to Whisper: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            tracing::error!("Whisper API error ({status}): {error_text}");
            return Err(AsrError::Upstream(format!("provider returned {status}: {error_text}")));
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!("failed to parse Whisper response: {e}");
            AsrError::Upstream(format!("failed to parse response: {e}"))
        })?;

        Ok(result.text)
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
