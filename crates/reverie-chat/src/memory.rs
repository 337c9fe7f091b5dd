use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::types::ChatEntry;

/// Bounded per-user conversation history
///
/// Entries are only ever appended or evicted, never mutated. Eviction
/// counts exchange pairs, not individual entries: a bound of K exchanges
/// keeps at most 2K entries, dropping the oldest pair first.
#[derive(Debug)]
pub struct ConversationHistory {
    entries: Vec<ChatEntry>,
    max_exchanges: usize,
}

impl ConversationHistory {
    fn new(max_exchanges: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_exchanges,
        }
    }

    /// Entries in chronological order
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// Number of entries (two per exchange)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a (user, assistant) exchange, evicting the oldest pairs
    /// beyond the bound
    pub fn append_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.entries.push(ChatEntry::user(user));
        self.entries.push(ChatEntry::assistant(assistant));

        let max_entries = self.max_exchanges * 2;
        if self.entries.len() > max_entries {
            let excess = self.entries.len() - max_entries;
            self.entries.drain(..excess);
        }
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Process-wide conversation store, keyed by user identifier
///
/// Histories are created lazily on first reference and live until
/// cleared or process shutdown; nothing is persisted. Each history sits
/// behind its own async mutex so the orchestrator can hold one user's
/// lock across a remote call while other users proceed in parallel.
#[derive(Debug)]
pub struct ConversationStore {
    histories: DashMap<String, Arc<Mutex<ConversationHistory>>>,
    max_exchanges: usize,
}

impl ConversationStore {
    /// Create an empty store bounded at `max_exchanges` per user
    pub fn new(max_exchanges: usize) -> Self {
        Self {
            histories: DashMap::new(),
            max_exchanges,
        }
    }

    /// Fetch the history for a user, creating an empty one atomically
    pub fn history(&self, user_id: &str) -> Arc<Mutex<ConversationHistory>> {
        self.histories
            .entry(user_id.to_owned())
            .or_insert_with(|| {
                tracing::debug!(user_id, "created conversation history");
                Arc::new(Mutex::new(ConversationHistory::new(self.max_exchanges)))
            })
            .clone()
    }

    /// Drop one user's history; no-op when none exists
    pub fn clear(&self, user_id: &str) {
        if self.histories.remove(user_id).is_some() {
            tracing::debug!(user_id, "conversation history cleared");
        }
    }

    /// Drop every history; used at process shutdown
    pub fn clear_all(&self) {
        self.histories.clear();
    }

    /// Number of users with a live history
    pub fn user_count(&self) -> usize {
        self.histories.len()
    }
}
