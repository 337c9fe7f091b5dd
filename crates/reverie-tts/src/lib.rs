#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod http_client;
mod provider;
mod server;
mod store;
mod types;
mod validate;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{Result, TtsError};
pub use server::{Server, TtsServerBuilder};
pub use store::AudioStore;
pub use types::{SpeechRequest, SynthesisMetadata};

/// Build the TTS server from configuration, if the capability is enabled
pub fn build_server(config: &reverie_config::Config) -> anyhow::Result<Option<Arc<Server>>> {
    let Some(ref tts_config) = config.tts else {
        return Ok(None);
    };

    let server = Arc::new(
        TtsServerBuilder::new(tts_config)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to initialize TTS server: {e}"))?,
    );
    Ok(Some(server))
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/api/v1/tts", post(synthesize))
        .route("/api/v1/tts/json", post(synthesize_json))
}

/// Handle speech synthesis requests, returning the audio itself
async fn synthesize(
    State(server): State<Arc<Server>>,
    Json(request): Json<SpeechRequest>,
) -> Result<axum::response::Response> {
    tracing::debug!(chars = request.text.len(), "TTS request received");

    let synthesis = server.synthesize(&request.text).await?;

    tracing::debug!(bytes = synthesis.audio.len(), "speech synthesis complete");

    Ok(synthesis.into_audio_response())
}

/// Handle speech synthesis requests, returning metadata with a derived URL
async fn synthesize_json(
    State(server): State<Arc<Server>>,
    Json(request): Json<SpeechRequest>,
) -> Result<Json<SynthesisMetadata>> {
    tracing::debug!(chars = request.text.len(), "TTS metadata request received");

    let synthesis = server.synthesize(&request.text).await?;

    Ok(Json(synthesis.into_metadata()))
}
