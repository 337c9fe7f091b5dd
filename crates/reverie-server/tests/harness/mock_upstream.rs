//! Mock inference backend for endpoint tests
//!
//! Serves minimal Hugging Face and OpenAI-compatible routes returning
//! canned payloads, so the real routers can be exercised end to end.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Canned audio bytes served by the speech route
pub const MOCK_AUDIO: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

/// Canned transcript served by the transcription route
pub const MOCK_TRANSCRIPT: &str = "I walked by the river today.";

/// Mock backend that returns predictable responses
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    chat_count: AtomicU32,
    transcribe_count: AtomicU32,
    speech_count: AtomicU32,
    /// Number of requests to fail before succeeding (0 = never fail)
    fail_count: AtomicU32,
    /// Custom chat reply (if set)
    chat_reply: Option<String>,
}

impl MockUpstream {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0, None).await
    }

    /// Start a mock server that fails the first `n` requests with 500
    pub async fn start_failing(n: u32) -> anyhow::Result<Self> {
        Self::start_inner(n, None).await
    }

    /// Start a mock server with a custom chat reply
    pub async fn start_with_reply(reply: &str) -> anyhow::Result<Self> {
        Self::start_inner(0, Some(reply.to_owned())).await
    }

    async fn start_inner(fail_count: u32, chat_reply: Option<String>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            chat_count: AtomicU32::new(0),
            transcribe_count: AtomicU32::new(0),
            speech_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            chat_reply,
        });

        let app = Router::new()
            .route("/models/{*model}", routing::post(handle_transcription))
            .route("/v1/chat/completions", routing::post(handle_chat))
            .route("/v1/audio/speech", routing::post(handle_speech))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for the Hugging Face-style routes
    pub fn hf_base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Base URL for the OpenAI-style routes
    ///
    /// Includes `/v1` since those providers append paths like `/chat/completions`
    pub fn openai_base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of chat completion requests received
    pub fn chat_count(&self) -> u32 {
        self.state.chat_count.load(Ordering::Relaxed)
    }

    /// Number of transcription requests received
    pub fn transcribe_count(&self) -> u32 {
        self.state.transcribe_count.load(Ordering::Relaxed)
    }

    /// Number of speech synthesis requests received
    pub fn speech_count(&self) -> u32 {
        self.state.speech_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Wire types --

#[derive(Debug, Serialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    model: String,
    #[allow(dead_code)]
    messages: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    id: String,
    model: String,
    choices: Vec<Choice>,
}

#[derive(Debug, Serialize)]
struct Choice {
    index: u32,
    message: ChoiceMessage,
    finish_reason: String,
}

#[derive(Debug, Serialize)]
struct ChoiceMessage {
    role: String,
    content: String,
}

// -- Handlers --

fn take_failure(state: &MockState) -> Option<axum::response::Response> {
    let remaining = state.fail_count.load(Ordering::Relaxed);
    if remaining > 0 {
        state.fail_count.fetch_sub(1, Ordering::Relaxed);
        return Some(
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": {
                        "message": "mock server intentional failure",
                        "type": "server_error"
                    }
                })),
            )
                .into_response(),
        );
    }
    None
}

async fn handle_transcription(State(state): State<Arc<MockState>>) -> axum::response::Response {
    state.transcribe_count.fetch_add(1, Ordering::Relaxed);

    if let Some(failure) = take_failure(&state) {
        return failure;
    }

    Json(TranscriptionResponse {
        text: MOCK_TRANSCRIPT.to_owned(),
    })
    .into_response()
}

async fn handle_chat(State(state): State<Arc<MockState>>, Json(req): Json<ChatRequest>) -> axum::response::Response {
    state.chat_count.fetch_add(1, Ordering::Relaxed);

    if let Some(failure) = take_failure(&state) {
        return failure;
    }

    let content = state.chat_reply.as_deref().unwrap_or("That sounds like a lot to carry.");

    Json(ChatResponse {
        id: "chatcmpl-test-123".to_owned(),
        model: req.model,
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: "assistant".to_owned(),
                content: content.to_owned(),
            },
            finish_reason: "stop".to_owned(),
        }],
    })
    .into_response()
}

async fn handle_speech(State(state): State<Arc<MockState>>) -> axum::response::Response {
    state.speech_count.fetch_add(1, Ordering::Relaxed);

    if let Some(failure) = take_failure(&state) {
        return failure;
    }

    ([(axum::http::header::CONTENT_TYPE, "audio/wav")], MOCK_AUDIO.to_vec()).into_response()
}
