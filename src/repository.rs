//! In-memory entry repository
//!
//! Append-only store of submitted metrics with strictly increasing ids.
//! Append-and-assign-id happens under a single lock, so the repository can be
//! shared across threads.

use crate::types::{BehavioralMetrics, StoredEntry};
use chrono::Utc;
use parking_lot::Mutex;

#[derive(Debug)]
struct RepositoryState {
    entries: Vec<StoredEntry>,
    next_id: u64,
}

impl Default for RepositoryState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

/// Thread-safe append-only store of behavioral entries
#[derive(Debug, Default)]
pub struct EntryRepository {
    state: Mutex<RepositoryState>,
}

impl EntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append metrics, assigning the next id and a timestamp if none was given
    pub fn append(&self, mut metrics: BehavioralMetrics) -> StoredEntry {
        let timestamp = metrics.timestamp.take().unwrap_or_else(Utc::now);

        let mut state = self.state.lock();
        let entry = StoredEntry {
            id: state.next_id,
            timestamp,
            metrics,
        };
        state.next_id += 1;
        state.entries.push(entry.clone());

        tracing::info!(id = entry.id, "stored behavioral entry");
        entry
    }

    /// All entries in insertion order
    pub fn list_all(&self) -> Vec<StoredEntry> {
        self.state.lock().entries.clone()
    }

    /// The `n` most recent entries, in insertion order (most recent last)
    pub fn list_latest(&self, n: usize) -> Vec<StoredEntry> {
        let state = self.state.lock();
        let start = state.entries.len().saturating_sub(n);
        state.entries[start..].to_vec()
    }

    /// The most recent entry, if any
    pub fn last(&self) -> Option<StoredEntry> {
        self.state.lock().entries.last().cloned()
    }

    pub fn get(&self, id: u64) -> Option<StoredEntry> {
        self.state
            .lock()
            .entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Remove all entries and restart ids at 1
    pub fn clear(&self) {
        let mut state = self.state.lock();
        *state = RepositoryState::default();
        tracing::info!("cleared behavioral entries");
    }
}
