//! Per-column duplicate analysis over raw tokens.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::store::Column;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateAnalysis {
    /// Total occurrences of values that appear more than once.
    pub duplicate_count: usize,
    /// Distinct values that appear exactly once.
    pub unique_count: usize,
    /// `duplicate_count` over the non-missing count, as a percentage.
    pub duplicate_percentage: f64,
    pub most_common_value: Option<String>,
    pub most_common_count: usize,
}

/// Frequency table over the non-missing tokens, keyed in first-appearance
/// order. Missing cells are excluded here; their tally lives on the column.
pub(crate) fn value_counts(column: &Column) -> IndexMap<&str, usize> {
    let mut counts = IndexMap::new();
    for token in column.non_missing() {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Highest-frequency entry. Ties break on earliest first occurrence, which
/// is the map's insertion order, so the first strict maximum wins.
pub(crate) fn most_common<'a>(counts: &IndexMap<&'a str, usize>) -> Option<(&'a str, usize)> {
    let mut best: Option<(&str, usize)> = None;
    for (&value, &count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best
}

pub fn analyze(column: &Column) -> DuplicateAnalysis {
    let counts = value_counts(column);
    let non_missing: usize = counts.values().sum();
    let duplicate_count: usize = counts.values().filter(|&&count| count > 1).sum();
    let unique_count = counts.values().filter(|&&count| count == 1).count();
    let duplicate_percentage = if non_missing == 0 {
        0.0
    } else {
        duplicate_count as f64 / non_missing as f64 * 100.0
    };
    let (most_common_value, most_common_count) = match most_common(&counts) {
        Some((value, count)) => (Some(value.to_string()), count),
        None => (None, 0),
    };
    DuplicateAnalysis {
        duplicate_count,
        unique_count,
        duplicate_percentage,
        most_common_value,
        most_common_count,
    }
}
