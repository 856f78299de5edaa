pub mod config;
pub mod history;
pub mod report;
pub mod thresholds;
pub mod timer;
