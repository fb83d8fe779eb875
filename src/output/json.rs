//! JSON report sink

use std::io::Write;

use serde::Serialize;

use crate::engine::cell_diff::DiscrepancyRecord;
use crate::engine::report::CompareReport;
use crate::error::SinkError;

use super::ReportSink;

/// Serializes the discrepancy list as a JSON document
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
        }
    }

    pub fn compact(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    key_columns: &'a [String],
    discrepancies: &'a [DiscrepancyRecord],
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn write(&mut self, report: &CompareReport) -> Result<(), SinkError> {
        let doc = JsonReport {
            key_columns: &report.key_columns,
            discrepancies: &report.discrepancies,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &doc)?;
        } else {
            serde_json::to_writer(&mut self.writer, &doc)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}
