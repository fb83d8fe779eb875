//! Cell-level comparison of matched row pairs

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::model::{CellValue, KeySelector, Row};

/// One differing cell between a matched row pair
#[derive(Debug, Clone, Serialize)]
pub struct DiscrepancyRecord {
    /// Join-key values identifying the row pair
    pub key: Vec<CellValue>,
    /// Column name as it appears in the base dataset
    pub base_column: String,
    pub base_value: CellValue,
    /// Column name as the caller supplied it for the compare dataset
    /// (resolved back through the column mapping when one exists)
    pub compare_column: String,
    pub compare_value: CellValue,
}

/// Compares matched row pairs column by column
pub struct CellDiffer<'a> {
    columns: &'a [String],
    key: &'a KeySelector,
    /// base column name -> original compare-side name
    mapping: FxHashMap<String, String>,
}

impl<'a> CellDiffer<'a> {
    pub fn new(
        columns: &'a [String],
        key: &'a KeySelector,
        mapping: FxHashMap<String, String>,
    ) -> Self {
        Self {
            columns,
            key,
            mapping,
        }
    }

    /// Compare a matched pair positionally over the shared columns. Both
    /// rows follow the same reconciled column order, so name resolution is
    /// positional. Equal cells emit nothing; join-key cells are equal by
    /// construction of the inner join.
    pub fn diff_pair(&self, base: &Row, compare: &Row) -> Vec<DiscrepancyRecord> {
        let mut records = Vec::new();
        for (idx, column) in self.columns.iter().enumerate() {
            let base_value = base.get(idx).cloned().unwrap_or(CellValue::Null);
            let compare_value = compare.get(idx).cloned().unwrap_or(CellValue::Null);
            if base_value != compare_value {
                let compare_column = self
                    .mapping
                    .get(column)
                    .cloned()
                    .unwrap_or_else(|| column.clone());
                records.push(DiscrepancyRecord {
                    key: self.key.key_of(base).0,
                    base_column: column.clone(),
                    base_value,
                    compare_column,
                    compare_value,
                });
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Side;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn differ<'a>(
        cols: &'a [String],
        key: &'a KeySelector,
        mapping: &[(&str, &str)],
    ) -> CellDiffer<'a> {
        let mapping = mapping
            .iter()
            .map(|(b, c)| (b.to_string(), c.to_string()))
            .collect();
        CellDiffer::new(cols, key, mapping)
    }

    #[test]
    fn test_emits_one_record_per_differing_cell() {
        let cols = columns(&["id", "v", "w"]);
        let key = KeySelector::for_columns(&cols, &["id".to_string()], Side::Base).unwrap();
        let d = differ(&cols, &key, &[]);
        let base = Row::new(
            vec![CellValue::Int(2), CellValue::from("b"), CellValue::from("x")],
            0,
        );
        let compare = Row::new(
            vec![CellValue::Int(2), CellValue::from("c"), CellValue::from("x")],
            0,
        );
        let records = d.diff_pair(&base, &compare);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, vec![CellValue::Int(2)]);
        assert_eq!(records[0].base_column, "v");
        assert_eq!(records[0].base_value, CellValue::from("b"));
        assert_eq!(records[0].compare_column, "v");
        assert_eq!(records[0].compare_value, CellValue::from("c"));
    }

    #[test]
    fn test_mapped_column_reports_original_compare_name() {
        let cols = columns(&["id", "total"]);
        let key = KeySelector::for_columns(&cols, &["id".to_string()], Side::Base).unwrap();
        let d = differ(&cols, &key, &[("total", "amount")]);
        let base = Row::new(vec![CellValue::Int(1), CellValue::Int(10)], 0);
        let compare = Row::new(vec![CellValue::Int(1), CellValue::Int(11)], 0);
        let records = d.diff_pair(&base, &compare);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].base_column, "total");
        assert_eq!(records[0].compare_column, "amount");
    }

    #[test]
    fn test_equal_rows_emit_nothing() {
        let cols = columns(&["id", "v"]);
        let key = KeySelector::for_columns(&cols, &["id".to_string()], Side::Base).unwrap();
        let d = differ(&cols, &key, &[]);
        let row = Row::new(vec![CellValue::Int(1), CellValue::from("a")], 0);
        assert!(d.diff_pair(&row, &row.clone()).is_empty());
    }

    #[test]
    fn test_null_vs_value_is_a_discrepancy() {
        let cols = columns(&["id", "v"]);
        let key = KeySelector::for_columns(&cols, &["id".to_string()], Side::Base).unwrap();
        let d = differ(&cols, &key, &[]);
        let base = Row::new(vec![CellValue::Int(1), CellValue::Null], 0);
        let compare = Row::new(vec![CellValue::Int(1), CellValue::from("a")], 0);
        let records = d.diff_pair(&base, &compare);
        assert_eq!(records.len(), 1);
        assert!(records[0].base_value.is_null());
    }
}
