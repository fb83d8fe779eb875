//! Data model: cell values, rows, keys, and the partitioned dataset

mod dataset;
mod fingerprint;
mod key;
mod value;

pub use dataset::{Dataset, Row};
pub use fingerprint::Fingerprint;
pub use key::{Key, KeySelector};
pub use value::CellValue;
