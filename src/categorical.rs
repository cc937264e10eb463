//! Distribution statistics for Categorical columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{duplicates, store::Column};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalAnalysis {
    pub unique_values: usize,
    /// Value → occurrence count, in first-appearance order.
    pub value_distribution: IndexMap<String, usize>,
    pub most_common_value: Option<String>,
    pub most_common_count: usize,
    pub missing_values: usize,
}

pub fn analyze(column: &Column) -> CategoricalAnalysis {
    let counts = duplicates::value_counts(column);
    let (most_common_value, most_common_count) = match duplicates::most_common(&counts) {
        Some((value, count)) => (Some(value.to_string()), count),
        None => (None, 0),
    };
    let value_distribution: IndexMap<String, usize> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    CategoricalAnalysis {
        unique_values: value_distribution.len(),
        value_distribution,
        most_common_value,
        most_common_count,
        missing_values: column.missing_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(raw: &[Option<&str>]) -> Column {
        Column::new("c", raw.iter().map(|v| v.map(str::to_string)).collect())
    }

    #[test]
    fn distribution_preserves_first_appearance_order() {
        let col = column(&[Some("blue"), Some("red"), Some("blue"), None, Some("green")]);
        let analysis = analyze(&col);
        assert_eq!(analysis.unique_values, 3);
        assert_eq!(
            analysis.value_distribution.keys().collect::<Vec<_>>(),
            ["blue", "red", "green"]
        );
        assert_eq!(analysis.value_distribution["blue"], 2);
        assert_eq!(analysis.most_common_value.as_deref(), Some("blue"));
        assert_eq!(analysis.most_common_count, 2);
        assert_eq!(analysis.missing_values, 1);
    }

    #[test]
    fn ties_break_on_first_occurrence() {
        let col = column(&[Some("a"), Some("b"), Some("b"), Some("a")]);
        assert_eq!(analyze(&col).most_common_value.as_deref(), Some("a"));
    }

    #[test]
    fn all_missing_column_reports_zero_uniques() {
        let col = column(&[None, None]);
        let analysis = analyze(&col);
        assert_eq!(analysis.unique_values, 0);
        assert!(analysis.value_distribution.is_empty());
        assert_eq!(analysis.most_common_value, None);
        assert_eq!(analysis.most_common_count, 0);
        assert_eq!(analysis.missing_values, 2);
    }
}
