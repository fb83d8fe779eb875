//! Error types for the comparison engine

use thiserror::Error;

/// Which side of a comparison a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Base,
    Compare,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Base => write!(f, "base"),
            Side::Compare => write!(f, "compare"),
        }
    }
}

/// Which input dataset(s) had no rows at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptySide {
    Base,
    Compare,
    Both,
}

impl std::fmt::Display for EmptySide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptySide::Base => write!(f, "base dataset has no rows"),
            EmptySide::Compare => write!(f, "compare dataset has no rows"),
            EmptySide::Both => write!(f, "both datasets have no rows"),
        }
    }
}

/// Errors surfaced by the comparison engine
#[derive(Debug, Error)]
pub enum CompareError {
    /// One or both input datasets were empty at construction
    #[error("empty input: {0}")]
    EmptyDataset(EmptySide),

    /// A configured join-key or mapped column does not resolve to a real
    /// column after reconciliation
    #[error("schema mismatch: column '{column}' not found in {side} dataset")]
    SchemaMismatch { side: Side, column: String },

    /// A report sink failed while writing; distinct from comparison errors
    #[error("report sink failed")]
    Sink(#[from] SinkError),
}

/// Failures from report sinks (I/O layer)
#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompareError>;
