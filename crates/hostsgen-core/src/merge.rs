//! Cumulative, deduplicated set of hosts entries for one generation run.

use indexmap::IndexSet;

use crate::normalize;

/// Counts for one source folded into an [`EntrySet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Entry lines found in the source.
    pub entries: usize,
    /// Of those, how many were not already in the set.
    pub added: usize,
}

/// Unique entry lines across all sources.
///
/// Set semantics: inserting a line that is already present is a no-op. Iteration
/// follows first-insertion order so output is stable for identical input.
#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    entries: IndexSet<String>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one already-normalized entry. Returns true if it was new.
    pub fn insert(&mut self, entry: String) -> bool {
        self.entries.insert(entry)
    }

    /// Normalize `text` and insert every entry line it contains.
    pub fn extend_from_text(&mut self, text: &str) -> MergeStats {
        let mut stats = MergeStats::default();
        for entry in normalize::entries(text) {
            stats.entries += 1;
            if self.insert(entry) {
                stats.added += 1;
            }
        }
        stats
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
