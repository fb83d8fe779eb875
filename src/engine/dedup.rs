//! Per-key deduplication
//!
//! Runs after reconciliation and before fingerprinting: duplicate join
//! keys would corrupt the anti-join cardinality, so each key keeps exactly
//! one representative row. The first occurrence in source order wins,
//! keeping the result reproducible across runs.

use crate::model::{Dataset, KeySelector};

pub fn dedup(ds: &Dataset, key: &KeySelector) -> Dataset {
    let before = ds.count();
    let out = ds.group_and_reduce(key);
    let after = out.count();
    if after < before {
        log::debug!("dedup dropped {} duplicate-key rows", before - after);
    }
    out
}
