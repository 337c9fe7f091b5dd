use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    error::ChatError,
    http_client::http_client,
    types::{ChatEntry, Role},
};

use super::{ChatProvider, GenerationParams};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible chat completions provider
pub(crate) struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    params: GenerationParams,
}

// -- Wire types --

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoiceMessage {
    content: Option<String>,
}

const fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

impl OpenAiProvider {
    pub fn new(api_key: SecretString, base_url: Option<String>, params: GenerationParams, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_owned()),
            api_key,
            params,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn generate(&self, system: &str, messages: &[ChatEntry]) -> crate::error::Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let mut wire_messages = Vec::with_capacity(messages.len() + 1);
        wire_messages.push(OpenAiMessage {
            role: "system",
            content: system,
        });
        wire_messages.extend(messages.iter().map(|entry| OpenAiMessage {
            role: wire_role(entry.role),
            content: &entry.content,
        }));

        let body = OpenAiRequest {
            model: &self.params.model,
            messages: wire_messages,
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        };

        tracing::debug!(model = %self.params.model, turns = messages.len(), "OpenAI chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI chat request failed: {e}");
                ChatError::Upstream(format!("failed to send request to OpenAI: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            tracing::error!("OpenAI chat API error ({status}): {error_text}");
            return Err(ChatError::Upstream(format!("provider returned {status}: {error_text}")));
        }

        let result: OpenAiResponse = response.json().await.map_err(|e| {
            tracing::error!("failed to parse OpenAI chat response: {e}");
            ChatError::Upstream(format!("failed to parse response: {e}"))
        })?;

        let text = result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
