//! Pure partitioning of history into report buckets.
//!
//! Every entry is judged against its own frozen threshold snapshot, never
//! the current store, so re-categorizing old history after a threshold edit
//! yields the same buckets the speaker saw on stage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::HistoryEntry;
use crate::mode::Mode;

/// Report bucket for one completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    TooShort,
    OnTime,
    OverTime,
}

impl Outcome {
    /// Fixed report order: too short, on time, over time.
    pub const ALL: [Outcome; 3] = [Outcome::TooShort, Outcome::OnTime, Outcome::OverTime];

    pub fn label(self) -> &'static str {
        match self {
            Outcome::TooShort => "Too Short",
            Outcome::OnTime => "On Time",
            Outcome::OverTime => "Over Time",
        }
    }

    /// Judge an entry against its own snapshot. The on-time range is
    /// inclusive at the over-time boundary: finishing exactly on the bell
    /// counts as on time.
    pub fn for_entry(entry: &HistoryEntry) -> Outcome {
        let d = entry.duration_secs;
        if d < entry.thresholds.on_pace_secs {
            Outcome::TooShort
        } else if d <= entry.thresholds.over_time_secs {
            Outcome::OnTime
        } else {
            Outcome::OverTime
        }
    }
}

/// One mode's entries split by outcome, each bucket in recording order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeBuckets {
    pub too_short: Vec<HistoryEntry>,
    pub on_time: Vec<HistoryEntry>,
    pub over_time: Vec<HistoryEntry>,
}

impl ModeBuckets {
    pub fn bucket(&self, outcome: Outcome) -> &[HistoryEntry] {
        match outcome {
            Outcome::TooShort => &self.too_short,
            Outcome::OnTime => &self.on_time,
            Outcome::OverTime => &self.over_time,
        }
    }

    pub fn len(&self) -> usize {
        self.too_short.len() + self.on_time.len() + self.over_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// History partitioned by mode; modes iterate in fixed enum order.
pub type CategorizedHistory = BTreeMap<Mode, ModeBuckets>;

/// Partition entries by recorded mode and outcome. Pure: same input, same
/// output, no hidden state; bucket order preserves input order.
pub fn categorize(entries: &[HistoryEntry]) -> CategorizedHistory {
    let mut categorized = CategorizedHistory::new();
    for entry in entries {
        let buckets = categorized.entry(entry.mode).or_default();
        let bucket = match Outcome::for_entry(entry) {
            Outcome::TooShort => &mut buckets.too_short,
            Outcome::OnTime => &mut buckets.on_time,
            Outcome::OverTime => &mut buckets.over_time,
        };
        bucket.push(entry.clone());
    }
    categorized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::entry;
    use crate::thresholds::ThresholdSnapshot;

    #[test]
    fn scenario_buckets_for_30_45_60() {
        // Thresholds 30/45/60 (the test helper's snapshot).
        assert_eq!(Outcome::for_entry(&entry("a", 10, Mode::Speeches)), Outcome::TooShort);
        assert_eq!(Outcome::for_entry(&entry("a", 50, Mode::Speeches)), Outcome::OnTime);
        assert_eq!(Outcome::for_entry(&entry("a", 65, Mode::Speeches)), Outcome::OverTime);
    }

    #[test]
    fn boundaries_are_on_time_inclusive() {
        // duration == on_pace and duration == over_time both land on time.
        assert_eq!(Outcome::for_entry(&entry("a", 30, Mode::Speeches)), Outcome::OnTime);
        assert_eq!(Outcome::for_entry(&entry("a", 60, Mode::Speeches)), Outcome::OnTime);
        assert_eq!(Outcome::for_entry(&entry("a", 29, Mode::Speeches)), Outcome::TooShort);
        assert_eq!(Outcome::for_entry(&entry("a", 61, Mode::Speeches)), Outcome::OverTime);
    }

    #[test]
    fn entries_judged_by_their_own_snapshot() {
        let mut strict = entry("a", 50, Mode::Speeches);
        strict.thresholds = ThresholdSnapshot {
            on_pace_secs: 10,
            warning_secs: 20,
            over_time_secs: 30,
        };
        let lenient = entry("b", 50, Mode::Speeches);

        let buckets = &categorize(&[strict, lenient])[&Mode::Speeches];
        assert_eq!(buckets.over_time.len(), 1);
        assert_eq!(buckets.over_time[0].speaker, "a");
        assert_eq!(buckets.on_time.len(), 1);
        assert_eq!(buckets.on_time[0].speaker, "b");
    }

    #[test]
    fn groups_by_mode_and_keeps_input_order() {
        let entries = vec![
            entry("first", 50, Mode::Speeches),
            entry("intro", 50, Mode::Introductions),
            entry("second", 55, Mode::Speeches),
        ];
        let categorized = categorize(&entries);

        assert_eq!(categorized.len(), 2);
        let speeches = &categorized[&Mode::Speeches].on_time;
        assert_eq!(speeches[0].speaker, "first");
        assert_eq!(speeches[1].speaker, "second");
        assert_eq!(categorized[&Mode::Introductions].on_time[0].speaker, "intro");

        // Modes iterate in enum order regardless of first appearance.
        let modes: Vec<Mode> = categorized.keys().copied().collect();
        assert_eq!(modes, [Mode::Introductions, Mode::Speeches]);
    }

    #[test]
    fn categorize_is_idempotent() {
        let entries = vec![
            entry("a", 10, Mode::Speeches),
            entry("b", 50, Mode::TableTopics),
            entry("c", 65, Mode::Speeches),
        ];
        assert_eq!(categorize(&entries), categorize(&entries));
    }

    #[test]
    fn empty_history_yields_empty_map() {
        assert!(categorize(&[]).is_empty());
    }
}
