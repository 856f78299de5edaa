//! Core error types for podium-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures abort the attempted operation without changing state; storage
//! failures are surfaced once and never retried.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for podium-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors (bad speaker name, threshold ordering, state misuse)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Durable-storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Rejections raised when a session operation is attempted with bad input.
///
/// Every variant means the operation was aborted and no state changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Speaker name empty (or whitespace only) at start time
    #[error("speaker name must not be empty")]
    EmptySpeakerName,

    /// Thresholds not strictly increasing at start time
    #[error(
        "thresholds must be strictly increasing: on-pace ({on_pace}s) < warning ({warning}s) < over-time ({over_time}s)"
    )]
    ThresholdOrder {
        on_pace: u64,
        warning: u64,
        over_time: u64,
    },

    /// Start requested while a session is already running
    #[error("a session is already running; stop or reset it first")]
    SessionActive,
}

/// Durable-storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Payload could not be serialized for the kv store
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable at {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown or malformed configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed for the key's type
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => {
                if code.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
