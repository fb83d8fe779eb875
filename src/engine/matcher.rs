//! Set-based row classification
//!
//! Three anti-joins classify rows after deduplication:
//! - `base_only` / `compare_only`: join key absent from the other side.
//! - `mismatched`: join key present in both sides but the content digest
//!   differs ("present by key, absent by content"); its results are the
//!   candidates for cell-level diffing.
//!
//! A row with identical key and identical digest on both sides never
//! appears in any result set.

use crate::model::{Dataset, KeySelector};

/// Rows of `base` whose join key does not occur in `compare`
pub fn base_only(base: &Dataset, compare: &Dataset, key: &KeySelector) -> Dataset {
    base.anti_join(compare, key, false)
}

/// Rows of `compare` whose join key does not occur in `base`
pub fn compare_only(base: &Dataset, compare: &Dataset, key: &KeySelector) -> Dataset {
    compare.anti_join(base, key, false)
}

/// Rows of `left` with no (key, digest) counterpart in `right`. Includes
/// both rows absent by key and rows whose content differs; callers filter
/// the former out via the inner join on key. Inputs must be fingerprinted.
pub fn mismatched(left: &Dataset, right: &Dataset, key: &KeySelector) -> Dataset {
    left.anti_join(right, key, true)
}
