//! Timer engine implementation.
//!
//! The timer engine is a tick-counted state machine. It does not schedule
//! anything itself - the caller owns the recurring 1-second interval and
//! calls `tick()` once per fire.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start("Alice", Mode::Speeches, &thresholds)?;
//! // Once per second:
//! engine.tick(); // Returns Some(Event) when the display state changes
//! let ended = engine.stop(); // Some(Event::SessionEnded { entry, .. })
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;
use crate::history::HistoryEntry;
use crate::mode::Mode;
use crate::thresholds::{classify, DisplayState, ThresholdSnapshot, Thresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Core timer engine.
///
/// Holds at most one in-progress session. The session's thresholds are
/// frozen at `start()`; later store edits never reach it. In-progress
/// state is deliberately not serializable - a session exists only between
/// start and stop/reset within one process.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
    elapsed_secs: u64,
    speaker: String,
    mode: Mode,
    /// Frozen at start; Some exactly while Running.
    thresholds: Option<ThresholdSnapshot>,
}

impl TimerEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            elapsed_secs: 0,
            speaker: String::new(),
            mode: Mode::Introductions,
            thresholds: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The frozen session thresholds; None while idle.
    pub fn session_thresholds(&self) -> Option<ThresholdSnapshot> {
        self.thresholds
    }

    /// Live display state. Always Default while idle.
    pub fn display_state(&self) -> DisplayState {
        match (self.state, self.thresholds.as_ref()) {
            (TimerState::Running, Some(t)) => classify(self.elapsed_secs, t),
            _ => DisplayState::Default,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            speaker: self.speaker.clone(),
            mode: self.mode,
            elapsed_secs: self.elapsed_secs,
            display: self.display_state(),
            thresholds: self.thresholds,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session. Validates the speaker name and the threshold
    /// ordering; on any failure nothing changes.
    pub fn start(
        &mut self,
        speaker: &str,
        mode: Mode,
        thresholds: &Thresholds,
    ) -> Result<Event, ValidationError> {
        if self.state == TimerState::Running {
            return Err(ValidationError::SessionActive);
        }
        let speaker = speaker.trim();
        if speaker.is_empty() {
            return Err(ValidationError::EmptySpeakerName);
        }
        thresholds.validate()?;

        let snapshot = thresholds.snapshot();
        self.state = TimerState::Running;
        self.elapsed_secs = 0;
        self.speaker = speaker.to_string();
        self.mode = mode;
        self.thresholds = Some(snapshot);
        Ok(Event::SessionStarted {
            speaker: self.speaker.clone(),
            mode,
            thresholds: snapshot,
            at: Utc::now(),
        })
    }

    /// Advance elapsed time by exactly one second. Returns
    /// `Some(Event::DisplayChanged)` when the tick crosses a threshold
    /// boundary. No-op while idle.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let before = self.display_state();
        self.elapsed_secs += 1;
        let after = self.display_state();
        if after == before {
            return None;
        }
        Some(Event::DisplayChanged {
            state: after,
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        })
    }

    /// End the session, producing exactly one history entry carrying the
    /// final elapsed value and the frozen thresholds. None while idle.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let thresholds = self.thresholds.take()?;
        let entry = HistoryEntry {
            speaker: std::mem::take(&mut self.speaker),
            duration_secs: self.elapsed_secs,
            mode: self.mode,
            thresholds,
            recorded_at: Utc::now(),
        };
        self.state = TimerState::Idle;
        self.elapsed_secs = 0;
        Some(Event::SessionEnded {
            entry,
            at: Utc::now(),
        })
    }

    /// Clear elapsed, speaker and display state without recording
    /// anything. Callable from either state; idempotent.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.elapsed_secs = 0;
        self.speaker.clear();
        self.thresholds = None;
        Event::SessionReset { at: Utc::now() }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
