//! Short-lived cache that swallows repeated submissions.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Remembers keys for `window` after they are recorded.
///
/// Entries expire lazily on lookup and in bulk through [`Debouncer::sweep`],
/// so the map never grows past the keys seen within one window plus whatever
/// accumulated since the last sweep.
#[derive(Debug, Clone)]
pub struct Debouncer<K> {
    window: Duration,
    seen: HashMap<K, Instant>,
}

impl<K: Eq + Hash> Debouncer<K> {
    /// Creates an empty debouncer.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            seen: HashMap::new(),
        }
    }

    /// Whether `key` was recorded less than `window` before `now`.
    ///
    /// Expired entries are dropped.
    pub fn is_recent(&mut self, key: &K, now: Instant) -> bool {
        match self.seen.get(key) {
            Some(&at) if now.saturating_duration_since(at) < self.window => true,
            Some(_) => {
                self.seen.remove(key);
                false
            }
            None => false,
        }
    }

    /// Records `key` as seen at `now`.
    pub fn record(&mut self, key: K, now: Instant) {
        self.seen.insert(key, now);
    }

    /// Drops every expired entry. Returns how many were removed.
    #[instrument(skip(self, now))]
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.seen.len();
        let window = self.window;
        self.seen
            .retain(|_, at| now.saturating_duration_since(*at) < window);
        let removed = before - self.seen.len();
        if removed > 0 {
            debug!(removed, remaining = self.seen.len(), "Swept debounce entries");
        }
        removed
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no entries are held.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
