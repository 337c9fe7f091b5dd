#![allow(clippy::must_use_candidate)]

pub mod asr;
pub mod chat;
pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod tts;

use serde::Deserialize;

pub use asr::*;
pub use chat::*;
pub use cors::*;
pub use health::*;
pub use server::*;
pub use tts::*;

/// Top-level Reverie configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Speech-to-text configuration
    #[serde(default)]
    pub asr: Option<AsrConfig>,
    /// Reflective chat configuration
    #[serde(default)]
    pub chat: Option<ChatConfig>,
    /// Text-to-speech configuration
    #[serde(default)]
    pub tts: Option<TtsConfig>,
}
