//! Session controller tying the engine to durable state.
//!
//! `SessionController` owns the timer engine, the threshold store, the
//! in-memory history and the database handle. Mutations that touch
//! durable state (recording a session, editing thresholds, clearing
//! history) write the full snapshot back to storage before returning.

use crate::error::Result;
use crate::events::Event;
use crate::history::{CategorizedHistory, History, HistoryEntry};
use crate::mode::Mode;
use crate::storage::Database;
use crate::thresholds::{DisplayState, ThresholdKind, ThresholdStore, Thresholds, TimeField};
use crate::timer::{TimerEngine, TimerState};

/// Coordinates the tick engine, threshold store, history and storage.
///
/// All operations are synchronous local state transitions; the caller
/// drives the clock by calling [`SessionController::tick`] once per
/// second while a session runs.
pub struct SessionController {
    db: Database,
    thresholds: ThresholdStore,
    history: History,
    engine: TimerEngine,
}

impl SessionController {
    /// Load thresholds and history from storage and start idle.
    ///
    /// Absent keys yield defaults/empty; corrupt payloads degrade the
    /// same way (logged inside the storage layer).
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be queried at all.
    pub fn init(db: Database) -> Result<Self> {
        let thresholds = db.load_thresholds()?;
        let history = db.load_history()?;
        Ok(Self {
            db,
            thresholds,
            history,
            engine: TimerEngine::new(),
        })
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Start a session for `speaker` against the store's current set
    /// for `mode`. The set is validated and then frozen into the
    /// session; later store edits do not affect it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty speaker name, unordered
    /// thresholds, or a session already running. Nothing changes on
    /// failure.
    pub fn start(&mut self, speaker: &str, mode: Mode) -> Result<Event> {
        let set = self.thresholds.get(mode);
        Ok(self.engine.start(speaker, mode, &set)?)
    }

    /// Advance the running session by one second.
    pub fn tick(&mut self) -> Option<Event> {
        self.engine.tick()
    }

    /// End the running session and durably record its history entry.
    ///
    /// Returns `None` while idle. On success the entry has already been
    /// appended to history and the full list written to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the history snapshot cannot be written; the
    /// in-memory list keeps the entry, durable state catches up on the
    /// next successful write.
    pub fn stop(&mut self) -> Result<Option<HistoryEntry>> {
        let Some(Event::SessionEnded { entry, .. }) = self.engine.stop() else {
            return Ok(None);
        };
        self.history.record(entry.clone());
        self.db.save_history(&self.history)?;
        Ok(Some(entry))
    }

    /// Abandon the session (if any) without recording anything.
    pub fn reset(&mut self) -> Event {
        self.engine.reset()
    }

    // ── Thresholds ───────────────────────────────────────────────────

    /// Update one threshold field and persist the store.
    ///
    /// No ordering validation happens here; the next `start` enforces
    /// it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn set_threshold(
        &mut self,
        mode: Mode,
        kind: ThresholdKind,
        field: TimeField,
        value: u32,
    ) -> Result<Thresholds> {
        let updated = self.thresholds.set(mode, kind, field, value);
        self.db.save_thresholds(&self.thresholds)?;
        Ok(updated)
    }

    /// Restore a mode's built-in defaults and persist the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn reset_thresholds(&mut self, mode: Mode) -> Result<Thresholds> {
        let restored = self.thresholds.reset(mode);
        self.db.save_thresholds(&self.thresholds)?;
        Ok(restored)
    }

    // ── History ──────────────────────────────────────────────────────

    /// Remove every history entry, persist the empty list, and return
    /// how many entries were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty snapshot cannot be written.
    pub fn clear_history(&mut self) -> Result<usize> {
        let removed = self.history.clear();
        self.db.save_history(&self.history)?;
        Ok(removed)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.engine.elapsed_secs()
    }

    pub fn display_state(&self) -> DisplayState {
        self.engine.display_state()
    }

    /// Full engine state as a printable event.
    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn thresholds(&self) -> &ThresholdStore {
        &self.thresholds
    }

    /// History partitioned by mode and outcome bucket.
    pub fn categorized(&self) -> CategorizedHistory {
        self.history.categorized()
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &self.engine.state())
            .field("history_len", &self.history.len())
            .finish()
    }
}
