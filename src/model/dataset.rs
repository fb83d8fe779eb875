//! Partitioned, immutable table of rows
//!
//! A `Dataset` owns its row partitions; every operation borrows the input
//! and yields a new `Dataset`, so each pipeline stage is idempotent on
//! immutable inputs. Row-local work (projection, fingerprinting, filtering)
//! runs in parallel across partitions with no shared mutable state; the
//! joins and deduplication first co-partition rows by join-key hash and
//! then process buckets in parallel.

use indexmap::map::Entry;
use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use super::fingerprint::Fingerprint;
use super::key::{Key, KeySelector};
use super::value::CellValue;

/// A row: cell values in column order plus bookkeeping attributes
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in the dataset's column order
    pub cells: Vec<CellValue>,
    /// Position in the originally loaded dataset (0-indexed); ties in
    /// deduplication are broken by the lowest value
    pub source_row: usize,
    /// Content digest attached by the fingerprinting stage
    pub fingerprint: Option<Fingerprint>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_row: usize) -> Self {
        Self {
            cells,
            source_row,
            fingerprint: None,
        }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// An ordered set of named columns and a partitioned collection of rows.
/// Invariant: all rows have exactly one cell per column.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    partitions: Vec<Vec<Row>>,
}

impl Dataset {
    /// Build a dataset from loaded rows, assigning source positions and
    /// splitting into contiguous partitions.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let rows: Vec<Row> = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| Row::new(cells, i))
            .collect();
        Self::from_owned_rows(columns, rows)
    }

    fn from_owned_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let parts = default_partitions();
        let chunk = rows.len().div_ceil(parts).max(1);
        let partitions = rows
            .chunks(chunk)
            .map(|c| c.to_vec())
            .collect::<Vec<_>>();
        Self {
            columns,
            partitions,
        }
    }

    fn from_parts(columns: Vec<String>, partitions: Vec<Vec<Row>>) -> Self {
        Self {
            columns,
            partitions,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Total row count across partitions
    pub fn count(&self) -> usize {
        self.partitions.par_iter().map(|p| p.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(|p| p.is_empty())
    }

    /// Iterate rows in partition order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.partitions.iter().flatten()
    }

    /// Collect rows ordered by their original source position
    pub fn collect_rows(&self) -> Vec<Row> {
        let mut rows: Vec<Row> = self.rows().cloned().collect();
        rows.sort_by_key(|r| r.source_row);
        rows
    }

    /// Project to the given column indices, relabeled with `columns`.
    /// Fingerprints are dropped since row content changes.
    pub fn project(&self, indices: &[usize], columns: Vec<String>) -> Dataset {
        let partitions = self
            .partitions
            .par_iter()
            .map(|part| {
                part.iter()
                    .map(|row| {
                        let cells = indices
                            .iter()
                            .map(|&i| row.cells.get(i).cloned().unwrap_or(CellValue::Null))
                            .collect();
                        Row::new(cells, row.source_row)
                    })
                    .collect()
            })
            .collect();
        Dataset::from_parts(columns, partitions)
    }

    /// Rename a single column, leaving rows untouched
    pub fn rename_column(&self, from: &str, to: &str) -> Dataset {
        let columns = self
            .columns
            .iter()
            .map(|c| if c == from { to.to_string() } else { c.clone() })
            .collect();
        Dataset::from_parts(columns, self.partitions.clone())
    }

    /// Apply `f` to every row in parallel
    pub fn map_rows<F>(&self, f: F) -> Dataset
    where
        F: Fn(&Row) -> Row + Sync,
    {
        let partitions = self
            .partitions
            .par_iter()
            .map(|part| part.iter().map(&f).collect())
            .collect();
        Dataset::from_parts(self.columns.clone(), partitions)
    }

    /// Collapse rows sharing a join key to one representative per key,
    /// keeping the row with the lowest source position.
    pub fn group_and_reduce(&self, key: &KeySelector) -> Dataset {
        let buckets = self.shuffle_by_key(key);
        let partitions: Vec<Vec<Row>> = buckets
            .into_par_iter()
            .map(|bucket| {
                // IndexMap keeps first-insertion order so surviving rows
                // stay in source order within the bucket
                let mut survivors: IndexMap<Key, Row> = IndexMap::new();
                for row in bucket {
                    let k = key.key_of(&row);
                    match survivors.entry(k) {
                        Entry::Occupied(mut e) => {
                            if row.source_row < e.get().source_row {
                                e.insert(row);
                            }
                        }
                        Entry::Vacant(e) => {
                            e.insert(row);
                        }
                    }
                }
                survivors.into_values().collect()
            })
            .collect();
        Dataset::from_parts(self.columns.clone(), partitions)
    }

    /// Anti-join: rows of `self` whose probe (join key, and the content
    /// digest when `match_fingerprint` is set) has no counterpart in
    /// `other`. Both datasets must share the reconciled column order.
    pub fn anti_join(&self, other: &Dataset, key: &KeySelector, match_fingerprint: bool) -> Dataset {
        let self_buckets = self.shuffle_by_key(key);
        let other_buckets = other.shuffle_by_key(key);

        let partitions: Vec<Vec<Row>> = self_buckets
            .into_par_iter()
            .zip(other_buckets.into_par_iter())
            .map(|(mine, theirs)| {
                let present: FxHashSet<(Key, Option<Fingerprint>)> = theirs
                    .iter()
                    .map(|row| {
                        let fp = if match_fingerprint { row.fingerprint } else { None };
                        (key.key_of(row), fp)
                    })
                    .collect();
                mine.into_iter()
                    .filter(|row| {
                        let fp = if match_fingerprint { row.fingerprint } else { None };
                        !present.contains(&(key.key_of(row), fp))
                    })
                    .collect()
            })
            .collect();
        Dataset::from_parts(self.columns.clone(), partitions)
    }

    /// Inner join on join-key equality. One-to-one by construction: callers
    /// deduplicate both sides first, so each key maps to at most one row
    /// per side.
    pub fn inner_join_pairs(&self, other: &Dataset, key: &KeySelector) -> Vec<(Row, Row)> {
        let self_buckets = self.shuffle_by_key(key);
        let other_buckets = other.shuffle_by_key(key);

        self_buckets
            .into_par_iter()
            .zip(other_buckets.into_par_iter())
            .map(|(mine, theirs)| {
                let by_key: FxHashMap<Key, Row> = theirs
                    .into_iter()
                    .map(|row| (key.key_of(&row), row))
                    .collect();
                mine.into_iter()
                    .filter_map(|row| {
                        by_key
                            .get(&key.key_of(&row))
                            .cloned()
                            .map(|theirs| (row, theirs))
                    })
                    .collect::<Vec<_>>()
            })
            .flatten()
            .collect()
    }

    /// Shuffle rows into buckets by join-key hash. This is the only
    /// cross-partition coordination point; bucket contents preserve
    /// partition iteration order.
    fn shuffle_by_key(&self, key: &KeySelector) -> Vec<Vec<Row>> {
        let buckets = default_partitions();
        let mut out: Vec<Vec<Row>> = (0..buckets).map(|_| Vec::new()).collect();
        for row in self.rows() {
            let b = (key.key_of(row).bucket_hash() as usize) % buckets;
            out[b].push(row.clone());
        }
        out
    }
}

fn default_partitions() -> usize {
    rayon::current_num_threads().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Side;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn dataset(rows: Vec<Vec<CellValue>>) -> Dataset {
        Dataset::from_rows(columns(&["id", "v"]), rows)
    }

    fn selector(ds: &Dataset) -> KeySelector {
        KeySelector::for_columns(ds.columns(), &["id".to_string()], Side::Base).unwrap()
    }

    #[test]
    fn test_count_and_collect_order() {
        let ds = dataset(vec![
            vec![CellValue::Int(1), CellValue::from("a")],
            vec![CellValue::Int(2), CellValue::from("b")],
            vec![CellValue::Int(3), CellValue::from("c")],
        ]);
        assert_eq!(ds.count(), 3);
        let rows = ds.collect_rows();
        assert_eq!(rows[0].cells[0], CellValue::Int(1));
        assert_eq!(rows[2].cells[0], CellValue::Int(3));
    }

    #[test]
    fn test_project_reorders_and_relabels() {
        let ds = dataset(vec![vec![CellValue::Int(1), CellValue::from("a")]]);
        let out = ds.project(&[1, 0], columns(&["v", "id"]));
        assert_eq!(out.columns(), &["v".to_string(), "id".to_string()]);
        let rows = out.collect_rows();
        assert_eq!(rows[0].cells[0], CellValue::from("a"));
        assert_eq!(rows[0].cells[1], CellValue::Int(1));
    }

    #[test]
    fn test_group_and_reduce_first_wins() {
        let ds = dataset(vec![
            vec![CellValue::Int(1), CellValue::from("first")],
            vec![CellValue::Int(1), CellValue::from("second")],
            vec![CellValue::Int(2), CellValue::from("only")],
        ]);
        let key = selector(&ds);
        let deduped = ds.group_and_reduce(&key);
        assert_eq!(deduped.count(), 2);
        let rows = deduped.collect_rows();
        let one = rows
            .iter()
            .find(|r| r.cells[0] == CellValue::Int(1))
            .unwrap();
        assert_eq!(one.cells[1], CellValue::from("first"));
    }

    #[test]
    fn test_anti_join_on_key() {
        let base = dataset(vec![
            vec![CellValue::Int(1), CellValue::from("a")],
            vec![CellValue::Int(2), CellValue::from("b")],
        ]);
        let other = dataset(vec![vec![CellValue::Int(1), CellValue::from("x")]]);
        let key = selector(&base);
        let only = base.anti_join(&other, &key, false);
        let rows = only.collect_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[0], CellValue::Int(2));
    }

    #[test]
    fn test_anti_join_with_fingerprint() {
        let mk = |v: &str, fp: u8| {
            let mut row = Row::new(vec![CellValue::Int(1), CellValue::from(v)], 0);
            row.fingerprint = Some(Fingerprint::from_bytes([fp; 32]));
            row
        };
        let base = Dataset::from_parts(columns(&["id", "v"]), vec![vec![mk("a", 1)]]);
        let same = Dataset::from_parts(columns(&["id", "v"]), vec![vec![mk("a", 1)]]);
        let diff = Dataset::from_parts(columns(&["id", "v"]), vec![vec![mk("b", 2)]]);

        let key = selector(&base);
        assert_eq!(base.anti_join(&same, &key, true).count(), 0);
        // same key, different digest: present by key, absent by content
        assert_eq!(base.anti_join(&diff, &key, true).count(), 1);
        assert_eq!(base.anti_join(&diff, &key, false).count(), 0);
    }

    #[test]
    fn test_inner_join_pairs_matches_by_key() {
        let base = dataset(vec![
            vec![CellValue::Int(1), CellValue::from("a")],
            vec![CellValue::Int(2), CellValue::from("b")],
        ]);
        let other = dataset(vec![
            vec![CellValue::Int(2), CellValue::from("c")],
            vec![CellValue::Int(3), CellValue::from("d")],
        ]);
        let key = selector(&base);
        let pairs = base.inner_join_pairs(&other, &key);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.cells[0], CellValue::Int(2));
        assert_eq!(pairs[0].1.cells[1], CellValue::from("c"));
    }
}
