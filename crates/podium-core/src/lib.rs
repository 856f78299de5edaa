//! # Podium Core Library
//!
//! This library provides the core business logic for the Podium speaking
//! timer. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any future GUI is a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Tick Engine**: A caller-driven state machine that advances one
//!   second per `tick()` invocation and classifies the live display state
//! - **Thresholds**: Per-mode on-pace/warning/over-time sets, editable
//!   field by field and validated at session start
//! - **History**: Durable record of completed sessions, partitioned by
//!   mode and outcome bucket for reporting
//! - **Report**: Paginated PDF/plain-text export behind a draw-command
//!   trait
//! - **Storage**: SQLite-based key-value persistence and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SessionController`]: Engine + store + history + storage seam
//! - [`ThresholdStore`]: Per-mode threshold sets
//! - [`Database`]: History and threshold persistence
//! - [`Config`]: Application configuration management

pub mod controller;
pub mod error;
pub mod events;
pub mod history;
pub mod mode;
pub mod report;
pub mod storage;
pub mod thresholds;
pub mod timer;

pub use controller::SessionController;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use history::{categorize, CategorizedHistory, History, HistoryEntry, ModeBuckets, Outcome};
pub use mode::Mode;
pub use report::{export_pdf, render, report_filename, PdfCanvas, ReportCanvas, TextCanvas};
pub use storage::{Config, Database};
pub use thresholds::{
    classify, format_mm_ss, DisplayState, ThresholdKind, ThresholdSnapshot, ThresholdStore,
    ThresholdTime, Thresholds, TimeField,
};
pub use timer::{TimerEngine, TimerState};
