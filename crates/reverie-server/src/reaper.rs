use std::time::Duration;

use reverie_tts::AudioStore;
use tokio_util::sync::CancellationToken;

/// Timing for the background audio reaper
#[derive(Debug, Clone, Copy)]
pub struct ReapSettings {
    /// Age past which a generated file is removed
    pub max_age: Duration,
    /// Delay between scans
    pub interval: Duration,
}

/// Spawn the periodic reaper for generated audio files
///
/// Runs until the token is cancelled. Each tick removes files older
/// than the configured age; failures are logged inside the store and
/// never stop the loop.
pub fn spawn(store: AudioStore, settings: ReapSettings, shutdown: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(settings.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it so a fresh start
        // does not scan an empty directory
        ticker.tick().await;

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    store.reap(settings.max_age).await;
                }
            }
        }

        tracing::debug!("audio reaper stopped");
    })
}
