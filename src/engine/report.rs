//! Report assembly
//!
//! Collects discrepancy records into one ordered flat table: row pairs
//! sorted by join-key rendering, columns in canonical order within each
//! pair. Sorting by key makes the report byte-identical across runs
//! regardless of input row order. The assembler performs no I/O; sinks
//! receive the finished report.

use crate::model::{CellValue, KeySelector, Row};

use super::cell_diff::{CellDiffer, DiscrepancyRecord};

/// A matched-by-key, differing-by-digest row pair
#[derive(Debug, Clone)]
pub struct RowPair {
    pub base: Row,
    pub compare: Row,
}

/// The full outcome of a comparison with differences
#[derive(Debug)]
pub struct CompareReport {
    /// Join-key column names (base-side naming)
    pub key_columns: Vec<String>,
    /// Shared comparison columns in canonical order
    pub columns: Vec<String>,
    /// One record per differing cell, in report order
    pub discrepancies: Vec<DiscrepancyRecord>,
    /// The joined intermediate the discrepancies were derived from
    pub pairs: Vec<RowPair>,
}

impl CompareReport {
    /// Header row for tabular serialization: join keys first, then the
    /// four discrepancy fields
    pub fn header(&self) -> Vec<String> {
        let mut header = self.key_columns.clone();
        header.extend(
            ["base column", "base value", "compare column", "compare value"]
                .iter()
                .map(|s| s.to_string()),
        );
        header
    }

    /// Flatten one record into a field row matching `header()`
    pub fn record_fields(record: &DiscrepancyRecord) -> Vec<String> {
        let mut fields: Vec<String> = record.key.iter().map(render_cell).collect();
        fields.push(record.base_column.clone());
        fields.push(render_cell(&record.base_value));
        fields.push(record.compare_column.clone());
        fields.push(render_cell(&record.compare_value));
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

fn render_cell(value: &CellValue) -> String {
    value.display().into_owned()
}

/// Order the matched pairs canonically and run the cell differ over them
pub fn assemble(
    key_columns: Vec<String>,
    columns: Vec<String>,
    mut pairs: Vec<(Row, Row)>,
    differ: &CellDiffer<'_>,
    key: &KeySelector,
) -> CompareReport {
    pairs.sort_by_key(|(base, _)| key.key_of(base).render());

    let mut discrepancies = Vec::new();
    let pairs: Vec<RowPair> = pairs
        .into_iter()
        .map(|(base, compare)| {
            discrepancies.extend(differ.diff_pair(&base, &compare));
            RowPair { base, compare }
        })
        .collect();

    log::debug!(
        "assembled {} discrepancies from {} row pairs",
        discrepancies.len(),
        pairs.len()
    );

    CompareReport {
        key_columns,
        columns,
        discrepancies,
        pairs,
    }
}
