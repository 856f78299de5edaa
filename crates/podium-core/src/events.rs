use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::mode::Mode;
use crate::thresholds::{DisplayState, ThresholdSnapshot};
use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        speaker: String,
        mode: Mode,
        thresholds: ThresholdSnapshot,
        at: DateTime<Utc>,
    },
    /// The display state crossed a threshold boundary on a tick.
    DisplayChanged {
        state: DisplayState,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// A session stopped; `entry` is the one record appended to history.
    SessionEnded {
        entry: HistoryEntry,
        at: DateTime<Utc>,
    },
    /// Elapsed, speaker and display state were cleared without recording.
    SessionReset {
        at: DateTime<Utc>,
    },
    HistoryCleared {
        removed: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        speaker: String,
        mode: Mode,
        elapsed_secs: u64,
        display: DisplayState,
        /// Frozen session thresholds; None while idle.
        thresholds: Option<ThresholdSnapshot>,
        at: DateTime<Utc>,
    },
}
