//! Core data types shared across the profiling pipeline.
//!
//! These types form the contract between the classifier, the quality
//! profiler, the visualizer, and the CLI's JSON output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Partition of dataset columns into semantic type sets.
///
/// The three sets are mutually exclusive and each preserves dataset column
/// order. Columns whose type is undecidable (e.g. boolean) appear in none of
/// them. Constructed once per dataset and passed by reference to every
/// downstream consumer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnClassification {
    /// Columns with numeric element types.
    pub numerical: Vec<String>,
    /// Columns with text or dictionary-encoded element types.
    pub categorical: Vec<String>,
    /// Columns with temporal element types.
    pub datetime: Vec<String>,
    /// Columns whose sampled values only partially matched date patterns.
    pub ambiguous: Vec<AmbiguousColumn>,
}

impl ColumnClassification {
    /// Check whether a column was classified into any set.
    pub fn contains(&self, column: &str) -> bool {
        self.numerical.iter().any(|c| c == column)
            || self.categorical.iter().any(|c| c == column)
            || self.datetime.iter().any(|c| c == column)
    }

    /// Total number of classified columns.
    pub fn classified_count(&self) -> usize {
        self.numerical.len() + self.categorical.len() + self.datetime.len()
    }

    /// Verify the partition invariant: no column appears in two sets.
    pub fn is_disjoint(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.numerical
            .iter()
            .chain(self.categorical.iter())
            .chain(self.datetime.iter())
            .all(|c| seen.insert(c.as_str()))
    }
}

/// Diagnostic for a text column whose sampled values neither fully matched
/// nor fully failed date-pattern matching. Non-fatal; the column is left
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbiguousColumn {
    /// Column name.
    pub column: String,
    /// Sampled row indices that failed every date pattern.
    pub unmatched_rows: Vec<usize>,
    /// A few of the unmatched values, for log and report display.
    pub example_values: Vec<String>,
}

/// Per-column null percentage entry, in dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnNullPercentage {
    pub column: String,
    /// Missing cells over row count, ×100, rounded to two decimals.
    pub percentage: f64,
}

/// Outlier findings for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub column: String,
    /// Flagged rows over row count (0.0–1.0).
    pub outlier_fraction: f64,
    pub outlier_count: usize,
}

impl OutlierRecord {
    pub fn new(column: impl Into<String>, outlier_count: usize, row_count: usize) -> Self {
        let outlier_fraction = if row_count == 0 {
            0.0
        } else {
            outlier_count as f64 / row_count as f64
        };
        Self {
            column: column.into(),
            outlier_fraction,
            outlier_count,
        }
    }
}

/// Data-quality statistics for one dataset.
///
/// Every field is independently optional or empty: a failure while computing
/// one statistic is logged and leaves only that field unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityReport {
    /// Percentage of rows that exactly duplicate an earlier row.
    pub duplicate_percentage: Option<f64>,
    /// Null percentage per column, dataset order.
    pub null_percentages: Option<Vec<ColumnNullPercentage>>,
    /// Outlier records for the profiled column subset.
    pub outliers: Vec<OutlierRecord>,
}

/// Descriptive statistics for one numerical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// One category with its observation count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Everything a profiling run produced, for display or JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOutcome {
    /// Path of the input dataset.
    pub input_file: String,
    /// (rows, columns) at load time.
    pub shape: (usize, usize),
    pub classification: ColumnClassification,
    pub quality: QualityReport,
    /// Saved chart files, in generation order.
    pub artifacts: Vec<PathBuf>,
    /// Visual report document, when that flow ran.
    pub visual_report: Option<PathBuf>,
    /// Summary report document, when that flow ran.
    pub summary_report: Option<PathBuf>,
    /// Transformed dataset written by the encode/scale step.
    pub scaled_output: Option<PathBuf>,
}
