//! CSV report sink

use std::path::{Path, PathBuf};

use crate::engine::report::CompareReport;
use crate::error::SinkError;

use super::ReportSink;

/// Writes the discrepancy table to a CSV file: one row per differing
/// cell, join-key columns first
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn to_path(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl ReportSink for CsvSink {
    fn write(&mut self, report: &CompareReport) -> Result<(), SinkError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(report.header())?;
        for record in &report.discrepancies {
            writer.write_record(CompareReport::record_fields(record))?;
        }
        writer.flush()?;
        Ok(())
    }
}
