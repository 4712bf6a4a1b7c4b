use std::collections::HashMap;

use crate::path_key::PathKey;
use crate::stats::Stat;

/// Process-wide mapping from call path to running statistics. One entry
/// per distinct path ever observed; the thread token inside the key
/// keeps threads from colliding.
#[derive(Debug, Default)]
pub struct ProfileGraph {
    entries: HashMap<PathKey, Stat>,
}

impl ProfileGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create-or-merge for one finished frame. The existence check and
    /// the update happen under the caller's single lock acquisition, so
    /// two threads finishing the same path never lose an update.
    pub fn record(&mut self, key: PathKey, elapsed_ms: f64) {
        self.entries.entry(key).or_default().record(elapsed_ms);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consistent copy of all entries, sorted by key so a parent comes
    /// immediately before its descendants and threads stay contiguous.
    pub fn snapshot(&self) -> Vec<(PathKey, Stat)> {
        let mut entries: Vec<(PathKey, Stat)> = self
            .entries
            .iter()
            .map(|(key, stat)| (key.clone(), *stat))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
