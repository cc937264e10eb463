//! Dataset-wide quality metrics: missingness and whole-row duplication.
//!
//! Missing counts come from the per-column analyzers; only the row-duplicate
//! scan touches the store itself, in one row-major pass over the ordered raw
//! tuples.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::store::ColumnStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Rows whose full ordered tuple of raw tokens matches an earlier row.
    pub complete_duplicates_count: usize,
    pub total_missing_values: usize,
    pub missing_values_by_column: IndexMap<String, usize>,
}

/// Counts occurrences beyond the first of each complete row tuple.
pub fn count_duplicate_rows(store: &ColumnStore) -> usize {
    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(store.row_count());
    let mut duplicates = 0usize;
    for index in 0..store.row_count() {
        let tuple: Vec<Option<&str>> = store
            .columns()
            .iter()
            .map(|column| column.values()[index].as_deref())
            .collect();
        if !seen.insert(tuple) {
            duplicates += 1;
        }
    }
    duplicates
}

pub fn aggregate(
    complete_duplicates_count: usize,
    missing_values_by_column: IndexMap<String, usize>,
) -> DataQuality {
    let total_missing_values = missing_values_by_column.values().sum();
    DataQuality {
        complete_duplicates_count,
        total_missing_values,
        missing_values_by_column,
    }
}
