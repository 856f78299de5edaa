//! Completed-session history.
//!
//! A [`HistoryEntry`] is created exactly once per stopped session and is
//! immutable afterwards. [`History`] keeps entries in recording order and
//! serializes transparently as a JSON array -- the exact payload the
//! durable kv store holds under its single history key.

mod categorize;

pub use categorize::{categorize, CategorizedHistory, ModeBuckets, Outcome};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::thresholds::ThresholdSnapshot;

/// An immutable record of one completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub speaker: String,
    pub duration_secs: u64,
    pub mode: Mode,
    /// The thresholds the session ran against, frozen at start.
    pub thresholds: ThresholdSnapshot,
    pub recorded_at: DateTime<Utc>,
}

/// Ordered, append-only list of completed sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the tail; insertion order is recording order.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Remove every entry; returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Partition by mode and outcome bucket.
    pub fn categorized(&self) -> CategorizedHistory {
        categorize(&self.entries)
    }
}

impl From<Vec<HistoryEntry>> for History {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
pub(crate) fn entry(speaker: &str, duration_secs: u64, mode: Mode) -> HistoryEntry {
    HistoryEntry {
        speaker: speaker.to_string(),
        duration_secs,
        mode,
        thresholds: ThresholdSnapshot {
            on_pace_secs: 30,
            warning_secs: 45,
            over_time_secs: 60,
        },
        recorded_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_preserves_order() {
        let mut history = History::new();
        history.record(entry("Alice", 50, Mode::Speeches));
        history.record(entry("Bob", 10, Mode::Speeches));
        history.record(entry("Cara", 65, Mode::Introductions));

        let speakers: Vec<&str> = history
            .entries()
            .iter()
            .map(|e| e.speaker.as_str())
            .collect();
        assert_eq!(speakers, ["Alice", "Bob", "Cara"]);
    }

    #[test]
    fn clear_reports_removed_count() {
        let mut history = History::new();
        history.record(entry("Alice", 50, Mode::Speeches));
        history.record(entry("Bob", 10, Mode::Speeches));
        assert_eq!(history.clear(), 2);
        assert!(history.is_empty());
        assert_eq!(history.clear(), 0);
    }
}
