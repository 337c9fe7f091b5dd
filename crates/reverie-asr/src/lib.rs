#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod http_client;
mod provider;
mod request;
mod server;
mod types;
mod validate;

use std::sync::Arc;

use axum::{Json, Router, extract::DefaultBodyLimit, extract::State, routing::post};

pub use error::{AsrError, Result};
pub use server::{AsrServerBuilder, Server};
pub use types::{TranscriptionRequest, TranscriptionResponse};
pub use validate::UploadLimits;

/// Build the ASR server from configuration, if the capability is enabled
pub fn build_server(config: &reverie_config::Config) -> anyhow::Result<Option<Arc<Server>>> {
    let Some(ref asr_config) = config.asr else {
        return Ok(None);
    };

    let server = Arc::new(
        AsrServerBuilder::new(asr_config)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to initialize ASR server: {e}"))?,
    );
    Ok(Some(server))
}

/// Create the endpoint router for ASR
///
/// `body_limit` is the transport-level cap in bytes; pass
/// [`Server::body_limit`] so it tracks the configured upload ceiling.
/// Uploads between the ceiling and this cap reach the validator, which
/// rejects them with the precise size in the error.
pub fn endpoint_router(body_limit: usize) -> Router<Arc<Server>> {
    Router::new()
        .route("/api/v1/asr", post(transcribe))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Handle transcription requests
async fn transcribe(
    State(server): State<Arc<Server>>,
    multipart: axum::extract::Multipart,
) -> Result<Json<TranscriptionResponse>> {
    let request = request::read_upload(multipart).await?;

    tracing::debug!(filename = %request.filename, bytes = request.audio.len(), "ASR request received");

    let response = server.transcribe(request).await?;

    tracing::debug!(chars = response.text.len(), "transcription complete");

    Ok(Json(response))
}
