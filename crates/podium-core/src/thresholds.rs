//! Threshold sets and elapsed-time classification.
//!
//! Each [`Mode`] owns one [`Thresholds`] set: three minute/second boundaries
//! (on-pace, warning, over-time). Edits are pure field updates with no
//! ordering validation -- a set may transiently violate the ordering until
//! the next session start, which is where the strict
//! `on_pace < warning < over_time` invariant is enforced.
//!
//! Classification is a pure function over seconds: the four display states
//! partition `[0, inf)` with no gap or overlap.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::mode::Mode;

/// One editable threshold boundary as a minutes/seconds pair.
///
/// Seconds are clamped to `[0, 59]` on every write; minutes are
/// non-negative by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl ThresholdTime {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes,
            seconds: seconds.min(59),
        }
    }

    pub fn from_total_secs(total: u64) -> Self {
        Self {
            minutes: (total / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    /// Total duration in seconds.
    pub fn total_secs(&self) -> u64 {
        u64::from(self.minutes).saturating_mul(60) + u64::from(self.seconds)
    }

    /// Set one field, clamping seconds to 59.
    pub fn set_field(&mut self, field: TimeField, value: u32) {
        match field {
            TimeField::Minutes => self.minutes = value,
            TimeField::Seconds => self.seconds = value.min(59),
        }
    }
}

impl fmt::Display for ThresholdTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_mm_ss(self.total_secs()))
    }
}

/// Which boundary of a threshold set an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    OnPace,
    Warning,
    OverTime,
}

impl ThresholdKind {
    /// Fixed display order: on-pace, warning, over-time.
    pub const ALL: [ThresholdKind; 3] = [
        ThresholdKind::OnPace,
        ThresholdKind::Warning,
        ThresholdKind::OverTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ThresholdKind::OnPace => "on-pace",
            ThresholdKind::Warning => "warning",
            ThresholdKind::OverTime => "over-time",
        }
    }
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThresholdKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normal: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normal.as_str() {
            "onpace" => Ok(ThresholdKind::OnPace),
            "warning" => Ok(ThresholdKind::Warning),
            "overtime" => Ok(ThresholdKind::OverTime),
            _ => Err(format!(
                "unknown threshold '{s}' (expected on-pace, warning or over-time)"
            )),
        }
    }
}

/// Which half of a minutes/seconds pair an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Minutes,
    Seconds,
}

impl FromStr for TimeField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minutes" | "min" | "m" => Ok(TimeField::Minutes),
            "seconds" | "sec" | "s" => Ok(TimeField::Seconds),
            _ => Err(format!("unknown field '{s}' (expected minutes or seconds)")),
        }
    }
}

/// One mode's three boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub on_pace: ThresholdTime,
    pub warning: ThresholdTime,
    pub over_time: ThresholdTime,
}

impl Thresholds {
    pub fn new(on_pace: ThresholdTime, warning: ThresholdTime, over_time: ThresholdTime) -> Self {
        Self {
            on_pace,
            warning,
            over_time,
        }
    }

    /// The built-in set for a mode.
    pub fn default_for(mode: Mode) -> Self {
        match mode {
            Mode::Introductions => Self {
                on_pace: ThresholdTime::new(0, 30),
                warning: ThresholdTime::new(0, 45),
                over_time: ThresholdTime::new(1, 0),
            },
            Mode::TableTopics => Self {
                on_pace: ThresholdTime::new(1, 0),
                warning: ThresholdTime::new(1, 30),
                over_time: ThresholdTime::new(2, 0),
            },
            Mode::Speeches => Self {
                on_pace: ThresholdTime::new(5, 0),
                warning: ThresholdTime::new(6, 0),
                over_time: ThresholdTime::new(7, 0),
            },
        }
    }

    pub fn get(&self, kind: ThresholdKind) -> ThresholdTime {
        match kind {
            ThresholdKind::OnPace => self.on_pace,
            ThresholdKind::Warning => self.warning,
            ThresholdKind::OverTime => self.over_time,
        }
    }

    /// Pure field update; no ordering validation at edit time.
    pub fn set(mut self, kind: ThresholdKind, field: TimeField, value: u32) -> Self {
        let slot = match kind {
            ThresholdKind::OnPace => &mut self.on_pace,
            ThresholdKind::Warning => &mut self.warning,
            ThresholdKind::OverTime => &mut self.over_time,
        };
        slot.set_field(field, value);
        self
    }

    /// Enforce the strict ordering invariant. Called at session start.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let (a, b, c) = (
            self.on_pace.total_secs(),
            self.warning.total_secs(),
            self.over_time.total_secs(),
        );
        if a < b && b < c {
            Ok(())
        } else {
            Err(ValidationError::ThresholdOrder {
                on_pace: a,
                warning: b,
                over_time: c,
            })
        }
    }

    /// Freeze into the seconds-resolved form captured by sessions.
    pub fn snapshot(&self) -> ThresholdSnapshot {
        ThresholdSnapshot {
            on_pace_secs: self.on_pace.total_secs(),
            warning_secs: self.warning.total_secs(),
            over_time_secs: self.over_time.total_secs(),
        }
    }
}

/// Seconds-resolved thresholds as captured into a session and its history
/// entry. Immutable once taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdSnapshot {
    pub on_pace_secs: u64,
    pub warning_secs: u64,
    pub over_time_secs: u64,
}

/// Per-mode threshold sets.
///
/// Modes without an explicit entry fall back to [`Thresholds::default_for`],
/// so a freshly added mode needs no stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdStore {
    sets: HashMap<Mode, Thresholds>,
}

impl Default for ThresholdStore {
    fn default() -> Self {
        let mut sets = HashMap::new();
        for mode in Mode::ALL {
            sets.insert(mode, Thresholds::default_for(mode));
        }
        Self { sets }
    }
}

impl ThresholdStore {
    /// The active set for a mode.
    pub fn get(&self, mode: Mode) -> Thresholds {
        self.sets
            .get(&mode)
            .copied()
            .unwrap_or_else(|| Thresholds::default_for(mode))
    }

    /// Apply one field edit and return the mode's updated set.
    pub fn set(&mut self, mode: Mode, kind: ThresholdKind, field: TimeField, value: u32) -> Thresholds {
        let updated = self.get(mode).set(kind, field, value);
        self.sets.insert(mode, updated);
        updated
    }

    /// Restore a mode's built-in defaults.
    pub fn reset(&mut self, mode: Mode) -> Thresholds {
        let defaults = Thresholds::default_for(mode);
        self.sets.insert(mode, defaults);
        defaults
    }
}

/// Live color/status derived from elapsed seconds vs. thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Default,
    OnPace,
    Warning,
    OverTime,
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DisplayState::Default => "--",
            DisplayState::OnPace => "on pace",
            DisplayState::Warning => "warning",
            DisplayState::OverTime => "over time",
        };
        f.write_str(s)
    }
}

/// Map elapsed seconds onto a display state by range membership.
pub fn classify(elapsed_secs: u64, thresholds: &ThresholdSnapshot) -> DisplayState {
    if elapsed_secs < thresholds.on_pace_secs {
        DisplayState::Default
    } else if elapsed_secs < thresholds.warning_secs {
        DisplayState::OnPace
    } else if elapsed_secs < thresholds.over_time_secs {
        DisplayState::Warning
    } else {
        DisplayState::OverTime
    }
}

/// Format a second count as zero-padded `mm:ss`.
pub fn format_mm_ss(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
