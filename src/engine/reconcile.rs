//! Column reconciliation
//!
//! Aligns the two datasets before any comparison: compare-side columns are
//! renamed to their base-side counterparts (column mapping, then join-key
//! pairs), ignored columns are dropped from each side, and both datasets
//! are restricted to the intersection of the remaining names in
//! lexicographic order. The sorted order makes downstream fingerprinting
//! independent of input column order.

use crate::config::CompareConfig;
use crate::error::{CompareError, Result, Side};
use crate::model::Dataset;

/// Both datasets projected onto the shared comparison columns
#[derive(Debug)]
pub struct Reconciled {
    pub base: Dataset,
    pub compare: Dataset,
    /// Join-key columns, base-side names
    pub join_columns: Vec<String>,
    /// Shared comparison columns in canonical (lexicographic) order
    pub columns: Vec<String>,
}

pub fn reconcile(base: &Dataset, compare: &Dataset, config: &CompareConfig) -> Result<Reconciled> {
    // Column mapping: rename compare columns to base naming. Both ends of
    // a mapping must resolve to real columns.
    let mut compare = compare.clone();
    for pair in &config.column_mapping {
        if base.column_index(&pair.base).is_none() {
            return Err(CompareError::SchemaMismatch {
                side: Side::Base,
                column: pair.base.clone(),
            });
        }
        if compare.column_index(&pair.compare).is_none() {
            return Err(CompareError::SchemaMismatch {
                side: Side::Compare,
                column: pair.compare.clone(),
            });
        }
        compare = compare.rename_column(&pair.compare, &pair.base);
    }

    // Drop ignored columns, each side by its own name
    let ignore = config.ignore_pairs();
    let base = drop_columns(base, ignore.iter().map(|p| p.base.as_str()));
    let mut compare = drop_columns(
        &compare,
        ignore.iter().map(|p| p.compare.as_str()),
    );

    // Align compare-side join-key names with the base side
    let join_pairs = config.join_pairs();
    for pair in join_pairs.iter().filter(|p| p.is_renamed()) {
        if compare.column_index(&pair.compare).is_none() {
            return Err(CompareError::SchemaMismatch {
                side: Side::Compare,
                column: pair.compare.clone(),
            });
        }
        compare = compare.rename_column(&pair.compare, &pair.base);
    }

    // Restrict both sides to the sorted common column set
    let mut columns: Vec<String> = base
        .columns()
        .iter()
        .filter(|c| compare.column_index(c).is_some())
        .cloned()
        .collect();
    columns.sort_unstable();

    let join_columns: Vec<String> = join_pairs.into_iter().map(|p| p.base).collect();
    for name in &join_columns {
        if !columns.contains(name) {
            let side = if base.column_index(name).is_none() {
                Side::Base
            } else {
                Side::Compare
            };
            return Err(CompareError::SchemaMismatch {
                side,
                column: name.clone(),
            });
        }
    }

    let base = select(&base, &columns);
    let compare = select(&compare, &columns);

    log::debug!(
        "reconciled to {} shared columns ({} join keys)",
        columns.len(),
        join_columns.len()
    );

    Ok(Reconciled {
        base,
        compare,
        join_columns,
        columns,
    })
}

/// Drop the named columns when present; absent names are ignored
fn drop_columns<'a>(ds: &Dataset, names: impl Iterator<Item = &'a str>) -> Dataset {
    let to_drop: Vec<&str> = names.collect();
    let kept: Vec<(usize, String)> = ds
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| !to_drop.contains(&c.as_str()))
        .map(|(i, c)| (i, c.clone()))
        .collect();
    if kept.len() == ds.columns().len() {
        return ds.clone();
    }
    let indices: Vec<usize> = kept.iter().map(|(i, _)| *i).collect();
    let columns: Vec<String> = kept.into_iter().map(|(_, c)| c).collect();
    ds.project(&indices, columns)
}

/// Project onto columns known to exist, in the given order
fn select(ds: &Dataset, columns: &[String]) -> Dataset {
    let indices: Vec<usize> = columns
        .iter()
        .map(|c| ds.column_index(c).expect("column checked during reconciliation"))
        .collect();
    ds.project(&indices, columns.to_vec())
}
