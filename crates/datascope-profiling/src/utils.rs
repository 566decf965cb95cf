//! Shared utilities for the profiling pipeline.
//!
//! Small helpers used across multiple modules; anything column-family
//! related lives here so the classifier, profiler, and visualizer agree on
//! what counts as numeric, categorical, or temporal.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a temporal type.
#[inline]
pub fn is_temporal_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Check if a DataType belongs to the categorical family (plain text or
/// dictionary-encoded categories).
#[inline]
pub fn is_categorical_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Round a value to two decimal places.
///
/// Used for every user-facing percentage and statistic in quality reports.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Extract the file stem (name without extension) from a path.
pub fn file_stem(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_is_temporal_dtype() {
        assert!(is_temporal_dtype(&DataType::Date));
        assert!(is_temporal_dtype(&DataType::Datetime(
            TimeUnit::Milliseconds,
            None
        )));
        assert!(!is_temporal_dtype(&DataType::String));
        assert!(!is_temporal_dtype(&DataType::Int64));
    }

    #[test]
    fn test_is_categorical_dtype() {
        assert!(is_categorical_dtype(&DataType::String));
        assert!(!is_categorical_dtype(&DataType::Int64));
        assert!(!is_categorical_dtype(&DataType::Boolean));
        assert!(!is_categorical_dtype(&DataType::Date));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(20.0), 20.0);
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(0.005), 0.01);
    }

    #[test]
    fn test_file_stem() {
        use std::path::Path;
        assert_eq!(file_stem(Path::new("data/sales.csv")), "sales");
        assert_eq!(file_stem(Path::new("train.parquet")), "train");
    }
}
