// In-process summary cache keyed by (source, time window).
//
// Entries are immutable Arc<SourceSummary> values. The only mutation is
// replacing a whole entry under the write lock, so readers see either the
// old summary or the new one, never a mix. Last write wins.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::models::{SourceSummary, TimeWindow};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    /// Platform-qualified source, e.g. "reddit:Existentialism"
    pub source: String,
    pub window: TimeWindow,
}

impl SourceKey {
    pub fn new(platform: &str, source_id: &str, window: TimeWindow) -> Self {
        Self {
            source: format!("{platform}:{source_id}"),
            window,
        }
    }
}

#[derive(Default)]
pub struct SummaryCache {
    entries: RwLock<HashMap<SourceKey, Arc<SourceSummary>>>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SourceKey) -> Option<Arc<SourceSummary>> {
        // A panicked writer can't leave a half-written entry, so poison is ignored
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    /// Store a summary, replacing any previous entry for the key.
    pub fn insert(&self, key: SourceKey, summary: Arc<SourceSummary>) {
        debug!(source = %key.source, window = %key.window, items = summary.items.len(), "Caching summary");
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, summary);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_whole_entry() {
        let cache = SummaryCache::new();
        let key = SourceKey::new("reddit", "Stoicism", TimeWindow::Recent);

        cache.insert(key.clone(), Arc::new(SourceSummary::empty("first")));
        cache.insert(key.clone(), Arc::new(SourceSummary::empty("second")));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).unwrap().label, "second");
    }

    #[test]
    fn windows_are_separate_keys() {
        let cache = SummaryCache::new();
        cache.insert(
            SourceKey::new("youtube", "zen", TimeWindow::Recent),
            Arc::new(SourceSummary::empty("week")),
        );

        assert!(cache
            .get(&SourceKey::new("youtube", "zen", TimeWindow::Medium))
            .is_none());
        assert!(cache
            .get(&SourceKey::new("reddit", "zen", TimeWindow::Recent))
            .is_none());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn readers_keep_their_snapshot() {
        let cache = SummaryCache::new();
        let key = SourceKey::new("reddit", "Meditation", TimeWindow::Long);
        cache.insert(key.clone(), Arc::new(SourceSummary::empty("old")));

        let held = cache.get(&key).unwrap();
        cache.insert(key.clone(), Arc::new(SourceSummary::empty("new")));

        assert_eq!(held.label, "old");
        assert_eq!(cache.get(&key).unwrap().label, "new");
    }
}
