use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::TtsError;

/// On-disk store for generated audio files
///
/// Filenames derive from a hash of the synthesized text, so repeated
/// requests for identical text overwrite the same file. That dedup is
/// deliberate: the content is identical, so the overwrite is idempotent
/// even when two requests race on the same name.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    /// Open the store, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> crate::error::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| TtsError::Config(format!("failed to create audio directory {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    /// Directory the store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Derive the filename for a piece of text
    pub fn filename_for(text: &str) -> String {
        let digest = format!("{:x}", md5::compute(text.as_bytes()));
        format!("audio_{}.wav", &digest[..12])
    }

    /// Write audio bytes under the text-derived filename
    pub async fn save(&self, text: &str, audio: &[u8]) -> crate::error::Result<PathBuf> {
        let path = self.dir.join(Self::filename_for(text));

        tokio::fs::write(&path, audio).await.map_err(|e| {
            tracing::error!("failed to save audio file {}: {e}", path.display());
            TtsError::WriteFailed(e.to_string())
        })?;

        tracing::debug!(path = %path.display(), bytes = audio.len(), "audio saved");
        Ok(path)
    }

    /// Best-effort removal of a generated file
    ///
    /// Failure is logged, never surfaced.
    pub async fn delete(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!("failed to delete audio file {}: {e}", path.display());
        }
    }

    /// Delete generated files older than `max_age`
    ///
    /// `Duration::ZERO` removes every generated file with a measurable
    /// age; a future-dated mtime is kept. Only files matching
    /// the `audio_*.wav` naming pattern are touched; individual failures
    /// are logged and the scan continues. Returns the number removed.
    pub async fn reap(&self, max_age: Duration) -> usize {
        let mut removed = 0;

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("failed to scan audio directory {}: {e}", self.dir.display());
                return 0;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if !is_generated_audio(&path) {
                continue;
            }

            let expired = match entry.metadata().await.and_then(|m| m.modified()) {
                // A future mtime (clock skew) has no measurable age;
                // keep the file instead of reaping it early
                Ok(modified) => modified.elapsed().is_ok_and(|age| age >= max_age),
                // Unreadable metadata: treat as expired rather than leak
                Err(_) => true,
            };

            if !expired {
                continue;
            }

            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!("failed to reap audio file {}: {e}", path.display()),
            }
        }

        if removed > 0 {
            tracing::info!(removed, "reaped old audio files");
        }

        removed
    }
}

/// Whether a path matches the generated-audio naming pattern
fn is_generated_audio(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("audio_") && n.ends_with(".wav"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, AudioStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn filename_is_stable_and_patterned() {
        let name = AudioStore::filename_for("That sounds hard.");
        assert_eq!(name, AudioStore::filename_for("That sounds hard."));
        assert!(name.starts_with("audio_"));
        assert!(name.ends_with(".wav"));
        // audio_ + 12 hex chars + .wav
        assert_eq!(name.len(), 22);
        assert!(name[6..18].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_text_different_filename() {
        assert_ne!(AudioStore::filename_for("one"), AudioStore::filename_for("two"));
    }

    #[tokio::test]
    async fn save_twice_overwrites_same_file() {
        let (_dir, store) = store();

        let first = store.save("hello", b"first bytes").await.unwrap();
        let second = store.save("hello", b"second bytes").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).unwrap(), b"second bytes");
        assert_eq!(std::fs::read_dir(store.dir()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn reap_zero_removes_all_generated_files() {
        let (_dir, store) = store();

        store.save("one", b"a").await.unwrap();
        store.save("two", b"b").await.unwrap();
        // Unrelated file must survive the reap
        std::fs::write(store.dir().join("keep.txt"), b"x").unwrap();

        let removed = store.reap(Duration::ZERO).await;

        assert_eq!(removed, 2);
        let names: Vec<_> = std::fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["keep.txt"]);
    }

    #[tokio::test]
    async fn reap_keeps_future_dated_files() {
        let (_dir, store) = store();

        let path = store.save("skewed", b"a").await.unwrap();
        let future = std::time::SystemTime::now() + Duration::from_secs(600);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(future)
            .unwrap();

        // No measurable age, so even the most aggressive reap keeps it
        assert_eq!(store.reap(Duration::ZERO).await, 0);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn reap_keeps_fresh_files() {
        let (_dir, store) = store();

        store.save("fresh", b"a").await.unwrap();
        let removed = store.reap(Duration::from_secs(3600)).await;

        assert_eq!(removed, 0);
        assert_eq!(std::fs::read_dir(store.dir()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn delete_missing_file_is_silent() {
        let (_dir, store) = store();
        store.delete(&store.dir().join("audio_000000000000.wav")).await;
    }
}
