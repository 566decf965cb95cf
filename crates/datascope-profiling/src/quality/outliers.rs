//! Pluggable outlier detection.

use crate::error::Result;
use crate::stats::{numeric_options, percentile};
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Strategy seam for row-level outlier detection.
///
/// Implementations scan a column subset and return the indices of rows
/// flagged in **more than** `sensitivity` of those columns. With the default
/// sensitivity of 0, one flagged column is enough.
pub trait OutlierDetector: Send {
    fn detect(&self, df: &DataFrame, sensitivity: usize, columns: &[String]) -> Result<Vec<usize>>;
}

/// Tukey-fences detector: a value is flagged when it falls outside
/// `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]` for its column.
///
/// Quartiles use linear interpolation between ranks; null cells are never
/// flagged and do not shift the fences.
#[derive(Debug, Clone, Copy, Default)]
pub struct IqrOutlierDetector;

impl OutlierDetector for IqrOutlierDetector {
    fn detect(&self, df: &DataFrame, sensitivity: usize, columns: &[String]) -> Result<Vec<usize>> {
        let mut flag_counts: HashMap<usize, usize> = HashMap::new();

        for name in columns {
            let series = df.column(name)?.as_materialized_series();
            let values = numeric_options(series)?;

            let mut non_null: Vec<f64> = values.iter().flatten().copied().collect();
            if non_null.is_empty() {
                continue;
            }
            non_null.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

            let q1 = percentile(&non_null, 25.0);
            let q3 = percentile(&non_null, 75.0);
            let iqr = q3 - q1;
            let lower = q1 - 1.5 * iqr;
            let upper = q3 + 1.5 * iqr;

            for (idx, value) in values.iter().enumerate() {
                if let Some(v) = value
                    && (*v < lower || *v > upper)
                {
                    *flag_counts.entry(idx).or_insert(0) += 1;
                }
            }
        }

        let mut indices: Vec<usize> = flag_counts
            .into_iter()
            .filter(|(_, count)| *count > sensitivity)
            .map(|(idx, _)| idx)
            .collect();
        indices.sort_unstable();
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_iqr_flags_extreme_value() {
        let df = df![
            "v" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0],
        ]
        .unwrap();

        let indices = IqrOutlierDetector
            .detect(&df, 0, &["v".to_string()])
            .unwrap();
        assert_eq!(indices, vec![9]);
    }

    #[test]
    fn test_iqr_no_outliers_in_tight_data() {
        let df = df![
            "v" => [10.0f64, 11.0, 12.0, 13.0, 14.0],
        ]
        .unwrap();

        let indices = IqrOutlierDetector
            .detect(&df, 0, &["v".to_string()])
            .unwrap();
        assert!(indices.is_empty());
    }

    #[test]
    fn test_iqr_ignores_null_cells() {
        let df = df![
            "v" => [Some(1.0f64), Some(2.0), None, Some(3.0), Some(4.0), Some(100.0)],
        ]
        .unwrap();

        let indices = IqrOutlierDetector
            .detect(&df, 0, &["v".to_string()])
            .unwrap();
        assert_eq!(indices, vec![5]);
    }

    #[test]
    fn test_sensitivity_requires_multiple_columns() {
        // Row 4 is extreme in both columns, row 5 only in "b"
        let df = df![
            "a" => [1.0f64, 2.0, 3.0, 4.0, 100.0, 5.0, 2.0, 3.0, 1.0, 4.0],
            "b" => [1.0f64, 2.0, 3.0, 4.0, 100.0, 90.0, 2.0, 3.0, 1.0, 4.0],
        ]
        .unwrap();

        let columns = vec!["a".to_string(), "b".to_string()];
        let strict = IqrOutlierDetector.detect(&df, 1, &columns).unwrap();
        assert_eq!(strict, vec![4]);

        let lenient = IqrOutlierDetector.detect(&df, 0, &columns).unwrap();
        assert_eq!(lenient, vec![4, 5]);
    }

    #[test]
    fn test_empty_column_subset() {
        let df = df!["v" => [1.0f64, 2.0]].unwrap();
        let indices = IqrOutlierDetector.detect(&df, 0, &[]).unwrap();
        assert!(indices.is_empty());
    }
}
