//! Error types for watchbill generation and configuration.
//!
//! "No qualified sailor" is never an error: such cells resolve to
//! [`CellValue::Unassigned`](crate::models::CellValue::Unassigned).

use chrono::NaiveDate;
use std::path::PathBuf;

/// Result type for engine operations.
pub type WatchbillResult<T> = Result<T, WatchbillError>;

/// Errors raised by the assignment engine and the generated watchbill.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchbillError {
    /// No stations or no time blocks were supplied; nothing can be generated.
    #[error("missing configuration: add watch stations and times (stations: {stations}, times: {times})")]
    MissingConfiguration { stations: usize, times: usize },

    /// A manual override targeted a station/time pair that is not in the watchbill.
    #[error("no cell for station '{station}' at '{time}'")]
    UnknownCell { station: String, time: String },

    /// A deserialized grid does not have one row per station and one cell per time.
    #[error("watchbill grid does not match {stations} stations x {times} times")]
    GridShape { stations: usize, times: usize },
}

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the in-memory record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: &'static str, name: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("leave #{0} not found")]
    LeaveNotFound(u64),

    #[error("leave type must not be empty")]
    MissingLeaveType,

    #[error("end date must be after start date ({start} .. {end})")]
    InvalidLeaveDates { start: NaiveDate, end: NaiveDate },

    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
