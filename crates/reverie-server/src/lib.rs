mod cors;
mod health;
mod reaper;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use reverie_config::Config;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    tts: Option<Arc<reverie_tts::Server>>,
    chat: Option<Arc<reverie_chat::Server>>,
    reap: Option<reaper::ReapSettings>,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if subsystem initialization (ASR, chat, TTS) fails
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

        let asr = reverie_asr::build_server(config)?;
        let tts = reverie_tts::build_server(config)?;
        let chat = reverie_chat::build_server(config)?;

        let reap = config.tts.as_ref().map(|tts_config| reaper::ReapSettings {
            max_age: Duration::from_secs(tts_config.max_age_seconds),
            interval: Duration::from_secs(tts_config.reap_interval_seconds),
        });

        // Build base router with feature routes
        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            let state = health::HealthState::from_subsystems(asr.as_deref(), chat.as_deref(), tts.as_deref());
            app = app.route(
                &config.server.health.path,
                axum::routing::get(health::health_handler).with_state(state),
            );
        }

        // ASR routes
        if let Some(ref asr) = asr {
            app = app.merge(reverie_asr::endpoint_router(asr.body_limit()).with_state(Arc::clone(asr)));
        }

        // Chat routes
        if let Some(ref chat) = chat {
            app = app.merge(reverie_chat::endpoint_router().with_state(Arc::clone(chat)));
        }

        // TTS routes plus static serving of generated audio
        if let Some(ref tts) = tts {
            app = app.merge(reverie_tts::endpoint_router().with_state(Arc::clone(tts)));
            app = app.nest_service("/audio", ServeDir::new(tts.store().dir()));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
            tts,
            chat,
            reap,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered, then clears
    /// conversation memory and removes generated audio before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let Self {
            router,
            listen_address,
            tts,
            chat,
            reap,
        } = self;

        let listener = tokio::net::TcpListener::bind(listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        let reaper_handle = match (&tts, reap) {
            (Some(tts), Some(settings)) => Some(reaper::spawn(tts.store().clone(), settings, shutdown.child_token())),
            _ => None,
        };

        axum::serve(listener, router)
            .with_graceful_shutdown({
                let shutdown = shutdown.clone();
                async move {
                    shutdown.cancelled().await;
                    tracing::info!("graceful shutdown initiated");
                }
            })
            .await?;

        if let Some(handle) = reaper_handle {
            handle.await.ok();
        }

        // Session state is ephemeral: drop histories and generated audio
        if let Some(ref chat) = chat {
            chat.store().clear_all();
        }
        if let Some(ref tts) = tts {
            let removed = tts.store().reap(Duration::ZERO).await;
            tracing::info!(removed, "cleaned audio directory on shutdown");
        }

        Ok(())
    }
}
