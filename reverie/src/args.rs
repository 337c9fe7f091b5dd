use std::path::PathBuf;

use clap::Parser;

/// Reverie journaling backend
#[derive(Debug, Parser)]
#[command(name = "reverie", about = "Voice journaling backend: transcription, reflective chat, and speech")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "reverie.toml", env = "REVERIE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "REVERIE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
