//! Comparison configuration

/// A column referenced on both sides, either by one shared name or by an
/// explicit (base, compare) name pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpec {
    /// Same name in both datasets
    Name(String),
    /// Different names per side
    Pair { base: String, compare: String },
}

impl ColumnSpec {
    /// Normalize into an explicit pair
    pub fn into_pair(self) -> ColumnPair {
        match self {
            ColumnSpec::Name(name) => ColumnPair {
                base: name.clone(),
                compare: name,
            },
            ColumnSpec::Pair { base, compare } => ColumnPair { base, compare },
        }
    }
}

impl From<&str> for ColumnSpec {
    fn from(name: &str) -> Self {
        ColumnSpec::Name(name.to_string())
    }
}

impl From<(&str, &str)> for ColumnSpec {
    fn from((base, compare): (&str, &str)) -> Self {
        ColumnSpec::Pair {
            base: base.to_string(),
            compare: compare.to_string(),
        }
    }
}

/// A (base, compare) column-name pair, the normalized form of every
/// column specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPair {
    pub base: String,
    pub compare: String,
}

impl ColumnPair {
    /// Do the two sides use different names?
    pub fn is_renamed(&self) -> bool {
        self.base != self.compare
    }
}

/// Configuration for a comparison
#[derive(Debug, Clone, Default)]
pub struct CompareConfig {
    /// Join-key columns defining row identity
    pub join_columns: Vec<ColumnSpec>,
    /// Compare-side columns renamed to base-side names before comparison
    pub column_mapping: Vec<ColumnPair>,
    /// Columns excluded from comparison entirely
    pub ignore_columns: Vec<ColumnSpec>,
    /// Pin fingerprinted intermediates for reuse across accessors
    pub cache_intermediates: bool,
}

impl CompareConfig {
    /// Create a configuration with the given join columns
    pub fn new(join_columns: Vec<ColumnSpec>) -> Self {
        Self {
            join_columns,
            ..Default::default()
        }
    }

    /// Set the column mapping
    pub fn with_column_mapping(mut self, mapping: Vec<ColumnPair>) -> Self {
        self.column_mapping = mapping;
        self
    }

    /// Set columns to ignore
    pub fn with_ignore_columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.ignore_columns = columns;
        self
    }

    /// Pin intermediate datasets in memory between accessor calls
    pub fn with_cache_intermediates(mut self, cache: bool) -> Self {
        self.cache_intermediates = cache;
        self
    }

    /// Join columns normalized into explicit pairs
    pub fn join_pairs(&self) -> Vec<ColumnPair> {
        self.join_columns
            .iter()
            .cloned()
            .map(ColumnSpec::into_pair)
            .collect()
    }

    /// Ignore columns normalized into explicit pairs
    pub fn ignore_pairs(&self) -> Vec<ColumnPair> {
        self.ignore_columns
            .iter()
            .cloned()
            .map(ColumnSpec::into_pair)
            .collect()
    }
}

/// Parse a CLI column specification: either `name` or `base=compare`
pub fn parse_column_spec(s: &str) -> ColumnSpec {
    match s.split_once('=') {
        Some((base, compare)) => ColumnSpec::Pair {
            base: base.trim().to_string(),
            compare: compare.trim().to_string(),
        },
        None => ColumnSpec::Name(s.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_normalizes_to_same_pair() {
        let pair = ColumnSpec::from("id").into_pair();
        assert_eq!(pair.base, "id");
        assert_eq!(pair.compare, "id");
        assert!(!pair.is_renamed());
    }

    #[test]
    fn test_pair_keeps_both_names() {
        let pair = ColumnSpec::from(("id", "ident")).into_pair();
        assert_eq!(pair.base, "id");
        assert_eq!(pair.compare, "ident");
        assert!(pair.is_renamed());
    }

    #[test]
    fn test_parse_column_spec() {
        assert_eq!(parse_column_spec("id"), ColumnSpec::from("id"));
        assert_eq!(parse_column_spec("id=ident"), ColumnSpec::from(("id", "ident")));
        assert_eq!(parse_column_spec(" a = b "), ColumnSpec::from(("a", "b")));
    }
}
