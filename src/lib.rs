//! tablecompare - Cell-level comparison of tabular datasets
//!
//! Compares a base and a compare dataset that represent the same logical
//! entities, possibly under different column names, and produces one
//! discrepancy record per differing cell. Rows are matched by join key;
//! full-row equality is decided by a 256-bit content fingerprint so that
//! matched-and-equal rows never pay a per-column comparison.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use config::{ColumnPair, ColumnSpec, CompareConfig};
pub use engine::{CompareOutcome, CompareReport, Comparator, DiscrepancyRecord};
pub use error::{CompareError, EmptySide, Result, Side};
pub use model::{CellValue, Dataset};
