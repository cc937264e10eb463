//! Descriptive statistics for Numeric columns.
//!
//! Degenerate inputs never error: a column with no numeric values reports
//! every statistic as `None`, and a single value leaves the sample standard
//! deviation undefined. Callers must not read `None` as failure.

use serde::{Deserialize, Serialize};

use crate::store::Column;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericalAnalysis {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Sample standard deviation (n − 1 denominator); `None` when n < 2.
    pub std: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub missing_values: usize,
    pub zero_values: usize,
}

pub fn analyze(column: &Column) -> NumericalAnalysis {
    let missing_values = column.missing_count();
    let mut values: Vec<f64> = column
        .non_missing()
        .filter_map(|token| token.parse::<f64>().ok())
        .collect();
    let zero_values = values.iter().filter(|&&value| value == 0.0).count();

    if values.is_empty() {
        return NumericalAnalysis {
            mean: None,
            median: None,
            min: None,
            max: None,
            std: None,
            q1: None,
            q3: None,
            missing_values,
            zero_values: 0,
        };
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    values.sort_by(f64::total_cmp);

    let std = if n < 2 {
        None
    } else {
        let sum_sq_dev: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        Some((sum_sq_dev / (n - 1) as f64).sqrt())
    };

    NumericalAnalysis {
        mean: Some(mean),
        median: Some(median(&values)),
        min: Some(values[0]),
        max: Some(values[n - 1]),
        std,
        q1: Some(quantile(&values, 0.25)),
        q3: Some(quantile(&values, 0.75)),
        missing_values,
        zero_values,
    }
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Linear-interpolation quantile at rank position (n − 1) · q.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let idx = pos.floor() as usize;
    let frac = pos - idx as f64;
    if idx + 1 < sorted.len() {
        sorted[idx] + frac * (sorted[idx + 1] - sorted[idx])
    } else {
        sorted[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(raw: &[Option<&str>]) -> Column {
        Column::new("n", raw.iter().map(|v| v.map(str::to_string)).collect())
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("statistic present");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn summary_statistics_over_a_small_sample() {
        let col = column(&[Some("2"), Some("4"), Some("4"), Some("4"), Some("5"), Some("5"), Some("7"), Some("9")]);
        let analysis = analyze(&col);
        assert_close(analysis.mean, 5.0);
        assert_close(analysis.median, 4.5);
        assert_close(analysis.min, 2.0);
        assert_close(analysis.max, 9.0);
        // Sample std dev of this classic sequence is sqrt(32/7).
        assert_close(analysis.std, (32.0f64 / 7.0).sqrt());
        assert_eq!(analysis.missing_values, 0);
        assert_eq!(analysis.zero_values, 0);
    }

    #[test]
    fn median_averages_the_two_middle_elements() {
        let col = column(&[Some("1"), Some("3"), Some("2"), Some("10")]);
        assert_close(analyze(&col).median, 2.5);
        let col = column(&[Some("1"), Some("3"), Some("2")]);
        assert_close(analyze(&col).median, 2.0);
    }

    #[test]
    fn quantiles_use_linear_interpolation() {
        // positions: q1 at 0.75 → 1.75, q3 at 2.25 over [1, 2, 3, 4]
        let col = column(&[Some("4"), Some("1"), Some("3"), Some("2")]);
        let analysis = analyze(&col);
        assert_close(analysis.q1, 1.75);
        assert_close(analysis.q3, 3.25);
        assert!(analysis.min.unwrap() <= analysis.q1.unwrap());
        assert!(analysis.q1.unwrap() <= analysis.median.unwrap());
        assert!(analysis.median.unwrap() <= analysis.q3.unwrap());
        assert!(analysis.q3.unwrap() <= analysis.max.unwrap());
    }

    #[test]
    fn single_value_leaves_std_undefined() {
        let col = column(&[Some("42"), None]);
        let analysis = analyze(&col);
        assert_close(analysis.mean, 42.0);
        assert_close(analysis.median, 42.0);
        assert_close(analysis.q1, 42.0);
        assert_close(analysis.q3, 42.0);
        assert_eq!(analysis.std, None);
        assert_eq!(analysis.missing_values, 1);
    }

    #[test]
    fn all_missing_column_reports_only_counts() {
        let col = column(&[None, None, None]);
        let analysis = analyze(&col);
        assert_eq!(analysis.mean, None);
        assert_eq!(analysis.median, None);
        assert_eq!(analysis.min, None);
        assert_eq!(analysis.max, None);
        assert_eq!(analysis.std, None);
        assert_eq!(analysis.q1, None);
        assert_eq!(analysis.q3, None);
        assert_eq!(analysis.missing_values, 3);
        assert_eq!(analysis.zero_values, 0);
    }

    #[test]
    fn zero_values_count_exact_zeroes() {
        let col = column(&[Some("0"), Some("0.0"), Some("-0"), Some("1")]);
        assert_eq!(analyze(&col).zero_values, 3);
    }
}
