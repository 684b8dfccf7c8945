//! # history.rs
//!
//! Bounded list of finished calculations, most recent first.
//!
//! Inserting into a full history evicts exactly the oldest entry. The list
//! can be exported and restored as JSON; the crate never writes it anywhere.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::trace;

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 50;

/// A finished calculation as it was displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression text that was evaluated.
    pub expression: String,
    /// The result text, rendered in the base active at the time.
    pub result: String,
}

impl HistoryEntry {
    /// Creates an entry from an expression and its displayed result.
    pub fn new<E: Into<String>, R: Into<String>>(expression: E, result: R) -> Self {
        Self { expression: expression.into(), result: result.into() }
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// Finished calculations, most recent first, bounded by `capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Creates an empty history keeping at most `capacity` entries.
    ///
    /// Storage grows with the entries actually recorded, so any `capacity`
    /// (up to `usize::MAX`) is accepted.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Inserts `entry` as the most recent one, evicting the oldest when full.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                trace!(%evicted, capacity = self.capacity, "history full, evicted oldest entry");
            }
        }
        self.entries.push_front(entry);
    }

    /// Records an evaluated expression with its displayed result.
    pub fn record(&mut self, expression: &str, result: &str) {
        self.push(HistoryEntry::new(expression, result));
    }

    /// Number of entries currently kept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry; the capacity is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entry at `index` (0 = most recent).
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Iterates over the entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Serializes the history to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restores a history from JSON.
    ///
    /// Entries beyond the stored capacity are dropped from the oldest end.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut history: Self = serde_json::from_str(json)?;
        history.entries.truncate(history.capacity);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("{n}+0"), n.to_string())
    }

    #[test]
    fn test_most_recent_first() {
        let mut history = History::default();
        history.record("1+1", "2");
        history.record("2*3", "6");
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0), Some(&HistoryEntry::new("2*3", "6")));
        assert_eq!(history.get(1).map(|e| e.to_string()), Some("1+1 = 2".to_string()));
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_capacity_evicts_exactly_the_oldest() {
        let mut history = History::with_capacity(3);
        for n in 0..3 {
            history.push(entry(n));
        }
        assert_eq!(history.len(), 3);

        history.push(entry(3));
        assert_eq!(history.len(), 3);
        let kept: Vec<_> = history.iter().map(|e| e.result.as_str()).collect();
        assert_eq!(kept, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_default_cap_holds_fifty() {
        let mut history = History::default();
        for n in 0..51 {
            history.push(entry(n));
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.get(49), Some(&entry(1)));
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = History::with_capacity(0);
        history.push(entry(1));
        assert!(history.is_empty());
    }

    #[test]
    fn test_unbounded_capacity_allocates_lazily() {
        let mut history = History::with_capacity(usize::MAX);
        assert_eq!(history.capacity(), usize::MAX);
        for n in 0..3 {
            history.push(entry(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.get(0), Some(&entry(2)));
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.push(entry(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.get(0), None);
    }

    #[test]
    fn test_json_round_trip() {
        let mut history = History::with_capacity(5);
        history.push(entry(1));
        history.push(entry(2));
        let json = history.to_json().unwrap();
        assert_eq!(History::from_json(&json).unwrap(), history);
    }

    #[test]
    fn test_from_json_respects_capacity() {
        let json = r#"{"entries":[{"expression":"a","result":"1"},{"expression":"b","result":"2"}],"capacity":1}"#;
        let history = History::from_json(json).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0).map(|e| e.expression.as_str()), Some("a"));
        assert!(History::from_json("not json").is_err());
    }
}
