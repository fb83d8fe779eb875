//! Report sinks
//!
//! The engine hands a finished `CompareReport` to a sink; everything here
//! is I/O and never feeds back into the comparison.

mod csv;
mod json;
mod terminal;

use crate::engine::report::CompareReport;
use crate::error::SinkError;

pub use self::csv::CsvSink;
pub use self::json::JsonSink;
pub use self::terminal::TerminalRenderer;

/// Serializes a comparison report to some medium
pub trait ReportSink {
    fn write(&mut self, report: &CompareReport) -> Result<(), SinkError>;
}
