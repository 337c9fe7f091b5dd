use std::time::Duration;

use reverie_config::{ChatConfig, ChatProviderType};
use secrecy::SecretString;

use crate::{
    error::ChatError,
    memory::ConversationStore,
    prompt::SYSTEM_PROMPT,
    provider::{ChatProvider, GenerationParams, anthropic::AnthropicProvider, openai::OpenAiProvider},
    types::ChatEntry,
};

/// Chat orchestrator: conversation store plus the configured provider
pub struct Server {
    provider: Box<dyn ChatProvider>,
    store: ConversationStore,
}

impl Server {
    /// Generate a supportive reply to a user's message
    ///
    /// Holds the user's history lock across the whole fetch, remote call,
    /// and append, so two concurrent turns for the same user cannot
    /// interleave and drop an exchange. Turns for different users run
    /// fully in parallel.
    pub async fn reply(&self, user_id: &str, message: &str) -> crate::error::Result<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let history = self.store.history(user_id);
        let mut history = history.lock().await;

        let mut messages = history.entries().to_vec();
        messages.push(ChatEntry::user(message));

        let reply = self.provider.generate(SYSTEM_PROMPT, &messages).await?;

        let reply = reply.trim();
        if reply.is_empty() {
            tracing::warn!(provider = %self.provider.name(), "generated response is empty");
            return Err(ChatError::EmptyResponse);
        }

        history.append_exchange(message, reply);

        Ok(reply.to_owned())
    }

    /// The conversation store, shared with the history endpoint and
    /// shutdown path
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Provider name, surfaced by the health endpoint
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

/// Builder for constructing the chat orchestrator from configuration
pub struct ChatServerBuilder<'a> {
    config: &'a ChatConfig,
}

impl<'a> ChatServerBuilder<'a> {
    pub const fn new(config: &'a ChatConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let api_key = resolve_api_key(self.config)?;
        let base_url = self.config.base_url.as_ref().map(ToString::to_string);
        let timeout = Duration::from_secs(self.config.timeout_seconds);

        let params = GenerationParams {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let provider: Box<dyn ChatProvider> = match self.config.provider_type {
            ChatProviderType::Openai => Box::new(OpenAiProvider::new(api_key, base_url, params, timeout)),
            ChatProviderType::Anthropic => Box::new(AnthropicProvider::new(api_key, base_url, params, timeout)),
        };

        tracing::debug!(
            provider = %provider.name(),
            model = %self.config.model,
            memory_size = self.config.memory_size,
            "chat server initialized"
        );

        Ok(Server {
            provider,
            store: ConversationStore::new(self.config.memory_size),
        })
    }
}

fn resolve_api_key(config: &ChatConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| ChatError::Config("API key required for chat provider".to_owned()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Mutex as AsyncMutex;

    use super::*;
    use crate::provider::ChatProvider;
    use crate::types::Role;

    /// Stub provider that records the conversations it receives
    struct StubProvider {
        calls: Arc<AtomicU32>,
        seen: Arc<AsyncMutex<Vec<Vec<ChatEntry>>>>,
        reply: String,
        /// Artificial latency to widen the race window in concurrency tests
        delay: Duration,
    }

    #[async_trait]
    impl ChatProvider for StubProvider {
        async fn generate(&self, _system: &str, messages: &[ChatEntry]) -> crate::error::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().await.push(messages.to_vec());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self.reply.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct Harness {
        server: Arc<Server>,
        calls: Arc<AtomicU32>,
        seen: Arc<AsyncMutex<Vec<Vec<ChatEntry>>>>,
    }

    fn harness(reply: &str, delay: Duration) -> Harness {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = Arc::new(AsyncMutex::new(Vec::new()));
        let server = Arc::new(Server {
            provider: Box::new(StubProvider {
                calls: Arc::clone(&calls),
                seen: Arc::clone(&seen),
                reply: reply.to_owned(),
                delay,
            }),
            store: ConversationStore::new(5),
        });
        Harness { server, calls, seen }
    }

    #[tokio::test]
    async fn first_turn_carries_no_prior_context() {
        let h = harness("That sounds hard.", Duration::ZERO);

        let reply = h.server.reply("alice", "I had a rough day").await.unwrap();
        assert_eq!(reply, "That sounds hard.");

        // The provider saw exactly one message: the new user turn
        let seen = h.seen.lock().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[0][0].role, Role::User);
        assert_eq!(seen[0][0].content, "I had a rough day");

        // Both turns were recorded
        let history = h.server.store().history("alice");
        assert_eq!(history.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn second_turn_carries_history_in_order() {
        let h = harness("Tell me more.", Duration::ZERO);

        h.server.reply("alice", "first").await.unwrap();
        h.server.reply("alice", "second").await.unwrap();

        let seen = h.seen.lock().await;
        assert_eq!(seen[1].len(), 3);
        assert_eq!(seen[1][0].content, "first");
        assert_eq!(seen[1][1].content, "Tell me more.");
        assert_eq!(seen[1][2].content, "second");
    }

    #[tokio::test]
    async fn empty_message_never_reaches_provider() {
        let h = harness("unused", Duration::ZERO);

        let err = h.server.reply("alice", "   ").await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
        assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn whitespace_reply_is_upstream_failure() {
        let h = harness("   \n", Duration::ZERO);

        let err = h.server.reply("alice", "hello").await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyResponse));

        // A failed turn must not pollute the history
        let history = h.server.store().history("alice");
        assert!(history.lock().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_turns_for_same_user_lose_nothing() {
        let h = harness("ok", Duration::from_millis(20));

        let first = tokio::spawn({
            let server = Arc::clone(&h.server);
            async move { server.reply("alice", "turn one").await }
        });
        let second = tokio::spawn({
            let server = Arc::clone(&h.server);
            async move { server.reply("alice", "turn two").await }
        });

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        // Both exchanges survive: 4 entries, never 2
        let history = h.server.store().history("alice");
        assert_eq!(history.lock().await.len(), 4);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn different_users_do_not_serialize() {
        let h = harness("ok", Duration::from_millis(50));

        let start = std::time::Instant::now();
        let alice = tokio::spawn({
            let server = Arc::clone(&h.server);
            async move { server.reply("alice", "hi").await }
        });
        let bob = tokio::spawn({
            let server = Arc::clone(&h.server);
            async move { server.reply("bob", "hi").await }
        });

        alice.await.unwrap().unwrap();
        bob.await.unwrap().unwrap();

        // Two 50ms turns overlapping: well under the serialized 100ms
        assert!(start.elapsed() < Duration::from_millis(95));
    }
}
