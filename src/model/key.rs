//! Join-key extraction and hashing

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::error::{CompareError, Result, Side};

use super::value::CellValue;
use super::Row;

/// The join-key values of a row, in join-column order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(pub Vec<CellValue>);

impl Key {
    /// Bucket hash used to co-partition datasets before a join
    pub fn bucket_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Stable rendering used for deterministic ordering of join results
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|v| v.display().into_owned())
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Resolves join-column names to cell indices and extracts keys
#[derive(Debug, Clone)]
pub struct KeySelector {
    indices: Vec<usize>,
}

impl KeySelector {
    /// Resolve key column names against a column list. Fails with a
    /// `SchemaMismatch` naming the first unresolved column.
    pub fn for_columns(columns: &[String], key_names: &[String], side: Side) -> Result<Self> {
        let indices = key_names
            .iter()
            .map(|name| {
                columns
                    .iter()
                    .position(|c| c == name)
                    .ok_or_else(|| CompareError::SchemaMismatch {
                        side,
                        column: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { indices })
    }

    /// Extract the join key from a row
    pub fn key_of(&self, row: &Row) -> Key {
        Key(self
            .indices
            .iter()
            .map(|&i| row.cells.get(i).cloned().unwrap_or(CellValue::Null))
            .collect())
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}
