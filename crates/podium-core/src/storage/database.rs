//! SQLite-backed key-value persistence.
//!
//! The durable state is two kv entries: the entire history list as one
//! JSON array under [`HISTORY_KEY`], and the per-mode threshold sets under
//! [`THRESHOLDS_KEY`]. Both are read in full on startup and overwritten in
//! full after every mutation; there is no migration or versioning.

use rusqlite::{params, Connection};
use std::path::Path;

use super::data_dir;
use crate::error::StorageError;
use crate::history::History;
use crate::thresholds::ThresholdStore;

/// kv key holding the serialized history list.
pub const HISTORY_KEY: &str = "history";
/// kv key holding the serialized per-mode threshold sets.
pub const THRESHOLDS_KEY: &str = "thresholds";

/// SQLite database with a single kv table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/podium.db`.
    ///
    /// Creates the file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("podium.db");
        Self::open_path(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_path(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (primarily for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Read the full history snapshot. An absent key yields an empty
    /// history; an unreadable payload is degraded to empty with a warning
    /// rather than propagated.
    pub fn load_history(&self) -> Result<History, StorageError> {
        match self.kv_get(HISTORY_KEY)? {
            None => Ok(History::new()),
            Some(json) => match serde_json::from_str(&json) {
                Ok(history) => Ok(history),
                Err(err) => {
                    tracing::warn!(%err, "stored history is unreadable; starting empty");
                    Ok(History::new())
                }
            },
        }
    }

    /// Overwrite the history snapshot in full.
    pub fn save_history(&self, history: &History) -> Result<(), StorageError> {
        let json = serde_json::to_string(history)?;
        self.kv_set(HISTORY_KEY, &json)?;
        tracing::debug!(entries = history.len(), "history snapshot written");
        Ok(())
    }

    /// Read the threshold sets; absent or unreadable payloads yield the
    /// built-in defaults.
    pub fn load_thresholds(&self) -> Result<ThresholdStore, StorageError> {
        match self.kv_get(THRESHOLDS_KEY)? {
            None => Ok(ThresholdStore::default()),
            Some(json) => match serde_json::from_str(&json) {
                Ok(store) => Ok(store),
                Err(err) => {
                    tracing::warn!(%err, "stored thresholds are unreadable; using defaults");
                    Ok(ThresholdStore::default())
                }
            },
        }
    }

    /// Overwrite the threshold sets in full.
    pub fn save_thresholds(&self, store: &ThresholdStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(store)?;
        self.kv_set(THRESHOLDS_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::entry;
    use crate::mode::Mode;
    use crate::thresholds::{ThresholdKind, TimeField};

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "replaced").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "replaced");
    }

    #[test]
    fn history_round_trip_is_field_for_field() {
        let db = Database::open_memory().unwrap();
        let mut history = History::new();
        history.record(entry("Alice", 50, Mode::Speeches));
        history.record(entry("Bob", 65, Mode::TableTopics));

        db.save_history(&history).unwrap();
        let loaded = db.load_history().unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn absent_history_loads_empty() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_history().unwrap().is_empty());
    }

    #[test]
    fn corrupt_history_degrades_to_empty() {
        let db = Database::open_memory().unwrap();
        db.kv_set(HISTORY_KEY, "{not json[").unwrap();
        assert!(db.load_history().unwrap().is_empty());
    }

    #[test]
    fn history_is_stored_as_a_json_array() {
        let db = Database::open_memory().unwrap();
        let mut history = History::new();
        history.record(entry("Alice", 50, Mode::Speeches));
        db.save_history(&history).unwrap();

        let raw = db.kv_get(HISTORY_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn thresholds_round_trip_and_defaults() {
        let db = Database::open_memory().unwrap();
        // Absent key yields defaults.
        let mut store = db.load_thresholds().unwrap();
        assert_eq!(store, ThresholdStore::default());

        store.set(Mode::Speeches, ThresholdKind::OverTime, TimeField::Minutes, 9);
        db.save_thresholds(&store).unwrap();
        let loaded = db.load_thresholds().unwrap();
        assert_eq!(loaded.get(Mode::Speeches).over_time.total_secs(), 540);
    }

    #[test]
    fn corrupt_thresholds_degrade_to_defaults() {
        let db = Database::open_memory().unwrap();
        db.kv_set(THRESHOLDS_KEY, "\"nope\"").unwrap();
        assert_eq!(db.load_thresholds().unwrap(), ThresholdStore::default());
    }
}
