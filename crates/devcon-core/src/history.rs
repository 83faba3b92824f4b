//! Execution history
//!
//! Insertion-ordered record of previously accepted raw input, used by hosts
//! for up-arrow recall. With duplicate tracking off (the default) the list
//! stays duplicate-free and ordered by recency: re-executing an old entry
//! moves it to the end instead of growing the list.

/// Ordered list of previously executed raw input fragments.
#[derive(Debug, Default, Clone)]
pub struct ExecutionHistory {
    entries: Vec<String>,
}

impl ExecutionHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw input fragment.
    ///
    /// When `track_duplicates` is false and the fragment is already present,
    /// the old entry is removed before the fragment is re-appended, keeping
    /// the list in recency order without growing it.
    pub fn record(&mut self, raw: &str, track_duplicates: bool) {
        let existing = self.entries.iter().position(|entry| entry == raw);
        match existing {
            Some(index) if !track_duplicates => {
                self.entries.remove(index);
            }
            _ => {}
        }
        self.entries.push(raw.to_string());
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Owned copy of all entries, oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
