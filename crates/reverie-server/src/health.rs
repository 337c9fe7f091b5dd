use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Serialize;

/// Subsystem status snapshot taken at startup
#[derive(Debug, Clone)]
pub struct HealthState {
    services: BTreeMap<&'static str, String>,
}

impl HealthState {
    /// Record which capabilities are enabled and which provider backs each
    pub fn from_subsystems(
        asr: Option<&reverie_asr::Server>,
        chat: Option<&reverie_chat::Server>,
        tts: Option<&reverie_tts::Server>,
    ) -> Self {
        let service = |name: Option<&str>| name.unwrap_or("disabled").to_owned();

        let mut services = BTreeMap::new();
        services.insert("asr", service(asr.map(reverie_asr::Server::provider_name)));
        services.insert("chat", service(chat.map(reverie_chat::Server::provider_name)));
        services.insert("tts", service(tts.map(reverie_tts::Server::provider_name)));

        Self { services }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    services: BTreeMap<&'static str, String>,
}

/// Health check handler
pub async fn health_handler(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        services: state.services,
    })
}
