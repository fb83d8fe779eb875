//! Comparison engine
//!
//! Pipeline: reconcile columns, deduplicate per join key, fingerprint
//! rows, classify by anti-join, cell-diff the matched-but-differing
//! pairs, assemble the report. Construction validates eagerly: empty
//! inputs and unresolvable columns fail before any comparison runs.

pub mod cell_diff;
pub mod dedup;
pub mod fingerprint;
pub mod matcher;
pub mod reconcile;
pub mod report;

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::config::CompareConfig;
use crate::error::{CompareError, EmptySide, Result, Side};
use crate::model::{Dataset, KeySelector};
use crate::output::{CsvSink, ReportSink};

pub use cell_diff::{CellDiffer, DiscrepancyRecord};
pub use report::{CompareReport, RowPair};

/// Result of a full comparison
#[derive(Debug)]
pub enum CompareOutcome {
    /// No base-side row differs by content; nothing to report
    Identical,
    /// At least one matched row pair differs
    Different(CompareReport),
}

impl CompareOutcome {
    pub fn is_identical(&self) -> bool {
        matches!(self, CompareOutcome::Identical)
    }

    pub fn report(&self) -> Option<&CompareReport> {
        match self {
            CompareOutcome::Identical => None,
            CompareOutcome::Different(report) => Some(report),
        }
    }
}

/// Compares two datasets cell by cell
#[derive(Debug)]
pub struct Comparator {
    config: CompareConfig,
    /// Reconciled and deduplicated inputs
    base: Dataset,
    compare: Dataset,
    key: KeySelector,
    key_columns: Vec<String>,
    columns: Vec<String>,
    /// base column name -> caller-supplied compare-side name
    reverse_mapping: FxHashMap<String, String>,
    /// Fingerprinted datasets, pinned when cache_intermediates is set
    cached: Option<(Dataset, Dataset)>,
}

impl Comparator {
    /// Build a comparator over two loaded datasets. Fails fast on empty
    /// inputs (distinguishing base/compare/both) and on join-key or
    /// mapped columns that do not resolve after reconciliation.
    pub fn new(base: Dataset, compare: Dataset, config: CompareConfig) -> Result<Self> {
        match (base.is_empty(), compare.is_empty()) {
            (true, true) => return Err(CompareError::EmptyDataset(EmptySide::Both)),
            (true, false) => return Err(CompareError::EmptyDataset(EmptySide::Base)),
            (false, true) => return Err(CompareError::EmptyDataset(EmptySide::Compare)),
            (false, false) => {}
        }

        let reconciled = reconcile::reconcile(&base, &compare, &config)?;
        let key = KeySelector::for_columns(
            &reconciled.columns,
            &reconciled.join_columns,
            Side::Base,
        )?;

        let base = dedup::dedup(&reconciled.base, &key);
        let compare = dedup::dedup(&reconciled.compare, &key);
        log::info!(
            "comparing {} base rows against {} compare rows on {:?}",
            base.count(),
            compare.count(),
            reconciled.join_columns
        );

        let reverse_mapping = config
            .column_mapping
            .iter()
            .map(|p| (p.base.clone(), p.compare.clone()))
            .collect();

        Ok(Self {
            config,
            base,
            compare,
            key,
            key_columns: reconciled.join_columns,
            columns: reconciled.columns,
            reverse_mapping,
            cached: None,
        })
    }

    /// Join-key column names (base-side naming)
    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    /// Shared comparison columns in canonical order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows present in base but absent from compare, by join key
    pub fn base_only_rows(&self) -> Dataset {
        matcher::base_only(&self.base, &self.compare, &self.key)
    }

    /// Rows present in compare but absent from base, by join key
    pub fn compare_only_rows(&self) -> Dataset {
        matcher::compare_only(&self.base, &self.compare, &self.key)
    }

    /// Run the full pipeline. Returns `Identical` when no base-side row
    /// is absent from compare by (key, digest); otherwise returns the
    /// report bundling the discrepancy list and the matched row pairs.
    pub fn compare(&mut self) -> Result<CompareOutcome> {
        let (base_fp, compare_fp) = self.fingerprinted();

        let base_mismatch = matcher::mismatched(&base_fp, &compare_fp, &self.key);
        if base_mismatch.count() == 0 {
            log::info!("datasets are identical under the configured keys");
            return Ok(CompareOutcome::Identical);
        }
        let compare_mismatch = matcher::mismatched(&compare_fp, &base_fp, &self.key);

        let pairs = base_mismatch.inner_join_pairs(&compare_mismatch, &self.key);
        let differ = CellDiffer::new(&self.columns, &self.key, self.reverse_mapping.clone());
        let report = report::assemble(
            self.key_columns.clone(),
            self.columns.clone(),
            pairs,
            &differ,
            &self.key,
        );
        Ok(CompareOutcome::Different(report))
    }

    /// Run the pipeline and hand the report to a sink. Performs no write
    /// when the datasets are identical. Sink failures surface as
    /// `CompareError::Sink`, distinct from comparison errors.
    pub fn report_to(&mut self, sink: &mut dyn ReportSink) -> Result<CompareOutcome> {
        let outcome = self.compare()?;
        if let CompareOutcome::Different(report) = &outcome {
            sink.write(report)?;
        }
        Ok(outcome)
    }

    /// Run the pipeline and write a CSV report to `path`
    pub fn report_to_path(&mut self, path: &Path) -> Result<CompareOutcome> {
        let mut sink = CsvSink::to_path(path);
        self.report_to(&mut sink)
    }

    fn fingerprinted(&mut self) -> (Dataset, Dataset) {
        if let Some((base, compare)) = &self.cached {
            return (base.clone(), compare.clone());
        }
        let base = fingerprint::attach_fingerprints(&self.base);
        let compare = fingerprint::attach_fingerprints(&self.compare);
        if self.config.cache_intermediates {
            self.cached = Some((base.clone(), compare.clone()));
        }
        (base, compare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnPair, ColumnSpec};
    use crate::model::CellValue;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn dataset(rows: Vec<Vec<CellValue>>) -> Dataset {
        Dataset::from_rows(columns(&["id", "v"]), rows)
    }

    fn config() -> CompareConfig {
        CompareConfig::new(vec![ColumnSpec::from("id")])
    }

    #[test]
    fn test_empty_dataset_errors_distinguish_sides() {
        let empty = dataset(vec![]);
        let full = dataset(vec![vec![CellValue::Int(1), CellValue::from("a")]]);

        let err = Comparator::new(empty.clone(), empty.clone(), config()).unwrap_err();
        assert!(matches!(err, CompareError::EmptyDataset(EmptySide::Both)));

        let err = Comparator::new(empty.clone(), full.clone(), config()).unwrap_err();
        assert!(matches!(err, CompareError::EmptyDataset(EmptySide::Base)));

        let err = Comparator::new(full, empty, config()).unwrap_err();
        assert!(matches!(err, CompareError::EmptyDataset(EmptySide::Compare)));
    }

    #[test]
    fn test_spec_scenario() {
        // base = {(1,"a"), (2,"b")}, compare = {(1,"a"), (2,"c"), (3,"d")}
        let base = dataset(vec![
            vec![CellValue::Int(1), CellValue::from("a")],
            vec![CellValue::Int(2), CellValue::from("b")],
        ]);
        let compare = dataset(vec![
            vec![CellValue::Int(1), CellValue::from("a")],
            vec![CellValue::Int(2), CellValue::from("c")],
            vec![CellValue::Int(3), CellValue::from("d")],
        ]);
        let mut cmp = Comparator::new(base, compare, config()).unwrap();

        assert_eq!(cmp.base_only_rows().count(), 0);
        let compare_only = cmp.compare_only_rows().collect_rows();
        assert_eq!(compare_only.len(), 1);
        assert_eq!(compare_only[0].cells[0], CellValue::Int(3));

        let outcome = cmp.compare().unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.discrepancies.len(), 1);
        let rec = &report.discrepancies[0];
        assert_eq!(rec.key, vec![CellValue::Int(2)]);
        assert_eq!(rec.base_column, "v");
        assert_eq!(rec.base_value, CellValue::from("b"));
        assert_eq!(rec.compare_column, "v");
        assert_eq!(rec.compare_value, CellValue::from("c"));
    }

    #[test]
    fn test_identical_datasets_short_circuit() {
        let rows: Vec<Vec<CellValue>> = (0..1000)
            .map(|i| vec![CellValue::Int(i), CellValue::from(format!("v{i}"))])
            .collect();
        let base = dataset(rows.clone());
        let compare = dataset(rows);
        let mut cmp = Comparator::new(base, compare, config()).unwrap();
        assert!(cmp.compare().unwrap().is_identical());
    }

    #[test]
    fn test_duplicate_keys_first_occurrence_wins() {
        let base = dataset(vec![
            vec![CellValue::Int(1), CellValue::from("first")],
            vec![CellValue::Int(1), CellValue::from("second")],
        ]);
        let compare = dataset(vec![vec![CellValue::Int(1), CellValue::from("first")]]);
        let mut cmp = Comparator::new(base, compare, config()).unwrap();
        // only the first base row participates, and it matches
        assert!(cmp.compare().unwrap().is_identical());
    }

    #[test]
    fn test_column_mapping_round_trip() {
        let base = Dataset::from_rows(
            columns(&["id", "total"]),
            vec![vec![CellValue::Int(1), CellValue::Int(10)]],
        );
        let compare = Dataset::from_rows(
            columns(&["id", "amount"]),
            vec![vec![CellValue::Int(1), CellValue::Int(11)]],
        );
        let cfg = config().with_column_mapping(vec![ColumnPair {
            base: "total".to_string(),
            compare: "amount".to_string(),
        }]);
        let mut cmp = Comparator::new(base, compare, cfg).unwrap();
        let outcome = cmp.compare().unwrap();
        let rec = &outcome.report().unwrap().discrepancies[0];
        assert_eq!(rec.base_column, "total");
        assert_eq!(rec.compare_column, "amount");
    }

    #[test]
    fn test_cache_intermediates_reuses_fingerprints() {
        let base = dataset(vec![vec![CellValue::Int(1), CellValue::from("a")]]);
        let compare = dataset(vec![vec![CellValue::Int(1), CellValue::from("b")]]);
        let cfg = config().with_cache_intermediates(true);
        let mut cmp = Comparator::new(base, compare, cfg).unwrap();
        let first = cmp.compare().unwrap();
        assert!(cmp.cached.is_some());
        let second = cmp.compare().unwrap();
        assert_eq!(
            first.report().unwrap().discrepancies.len(),
            second.report().unwrap().discrepancies.len()
        );
    }

    #[test]
    fn test_ignored_column_not_compared() {
        let base = Dataset::from_rows(
            columns(&["id", "v", "note"]),
            vec![vec![CellValue::Int(1), CellValue::from("a"), CellValue::from("x")]],
        );
        let compare = Dataset::from_rows(
            columns(&["id", "v", "note"]),
            vec![vec![CellValue::Int(1), CellValue::from("a"), CellValue::from("y")]],
        );
        let cfg = config().with_ignore_columns(vec![ColumnSpec::from("note")]);
        let mut cmp = Comparator::new(base, compare, cfg).unwrap();
        assert!(cmp.compare().unwrap().is_identical());
    }
}
