//! Row content digests

use serde::{Deserialize, Serialize};

use super::value::CellValue;

/// Contribution of a null or empty cell to the digest
const NULL_PLACEHOLDER: &[u8] = b"NULL";

/// A 256-bit content digest over a row's comparison-column values.
/// Identical column order + identical values gives an identical digest;
/// the matcher treats digest equality as full-row equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Digest the canonical rendering of every cell, concatenated in cell
    /// order with no separator. Null and empty renderings contribute the
    /// fixed `NULL` placeholder, never an omitted value, so a row with a
    /// blank in one position cannot collide with a row whose values are
    /// shifted.
    pub fn of_cells(cells: &[CellValue]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for cell in cells {
            let rendered = cell.display();
            if rendered.is_empty() {
                hasher.update(NULL_PLACEHOLDER);
            } else {
                hasher.update(rendered.as_bytes());
            }
        }
        Self(*hasher.finalize().as_bytes())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
