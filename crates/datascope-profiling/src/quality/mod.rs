//! Data-quality profiling: duplicates, missing values, outliers, and
//! per-column descriptive statistics.
//!
//! The profiler is read-only except for [`remove_duplicates_and_nulls`],
//! which callers invoke explicitly. Statistic failures never abort a run:
//! each is logged and reduced to an unset field in the [`QualityReport`].
//!
//! [`remove_duplicates_and_nulls`]: DataQualityProfiler::remove_duplicates_and_nulls

mod outliers;

pub use outliers::{IqrOutlierDetector, OutlierDetector};

use crate::error::{ProfilingError, Result};
use crate::stats::{mean, numeric_values, percentile, std_dev};
use crate::types::{
    CategoryCount, ColumnClassification, ColumnNullPercentage, NumericSummary, OutlierRecord,
    QualityReport,
};
use crate::utils::round2;
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{info, warn};

/// Computes quality statistics over one dataset.
pub struct DataQualityProfiler {
    detector: Box<dyn OutlierDetector>,
    sensitivity: usize,
}

impl Default for DataQualityProfiler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DataQualityProfiler {
    /// Profiler with the IQR detector at the given sensitivity.
    pub fn new(sensitivity: usize) -> Self {
        Self {
            detector: Box::new(IqrOutlierDetector),
            sensitivity,
        }
    }

    /// Profiler with a custom outlier detector.
    pub fn with_detector(detector: Box<dyn OutlierDetector>, sensitivity: usize) -> Self {
        Self {
            detector,
            sensitivity,
        }
    }

    /// Percentage of rows that exactly duplicate another row, rounded to two
    /// decimals.
    pub fn duplicate_percentage(&self, df: &DataFrame) -> Result<f64> {
        if df.height() == 0 {
            return Ok(0.0);
        }

        let unique = df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?;
        let duplicates = df.height() - unique.height();
        Ok(round2(duplicates as f64 / df.height() as f64 * 100.0))
    }

    /// Null percentage per column, in dataset column order, each rounded to
    /// two decimals.
    pub fn null_percentages(&self, df: &DataFrame) -> Result<Vec<ColumnNullPercentage>> {
        if df.height() == 0 {
            return Err(ProfilingError::EmptyDataset);
        }

        let height = df.height() as f64;
        Ok(df
            .get_columns()
            .iter()
            .map(|col| ColumnNullPercentage {
                column: col.name().to_string(),
                percentage: round2(col.null_count() as f64 / height * 100.0),
            })
            .collect())
    }

    /// Destructive cleanup: drop duplicate rows (keeping first occurrences in
    /// order), then drop every row containing a null. Row indices are
    /// contiguous afterwards by construction.
    pub fn remove_duplicates_and_nulls(&self, df: &mut DataFrame) -> Result<()> {
        let before = df.height();
        let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;

        let mut mask = BooleanChunked::full("mask".into(), true, deduped.height());
        for col in deduped.get_columns() {
            mask = &mask & &col.as_materialized_series().is_not_null();
        }

        *df = deduped.filter(&mask)?;
        info!(
            "Removed {} duplicate or null-containing rows ({} remain)",
            before - df.height(),
            df.height()
        );
        Ok(())
    }

    /// Outlier findings per column of the given subset.
    ///
    /// Each column is profiled independently so one failing column cannot
    /// suppress findings in the others.
    pub fn outlier_records(&self, df: &DataFrame, columns: &[String]) -> Vec<OutlierRecord> {
        let mut records = Vec::with_capacity(columns.len());
        for name in columns {
            match self
                .detector
                .detect(df, self.sensitivity, std::slice::from_ref(name))
            {
                Ok(indices) => {
                    records.push(OutlierRecord::new(name.clone(), indices.len(), df.height()));
                }
                Err(e) => {
                    warn!("Outlier detection failed for column '{}': {}", name, e);
                }
            }
        }
        records
    }

    /// Assemble the full quality report, isolating failures per statistic.
    pub fn quality_report(
        &self,
        df: &DataFrame,
        classification: &ColumnClassification,
    ) -> QualityReport {
        let duplicate_percentage = match self.duplicate_percentage(df) {
            Ok(pct) => Some(pct),
            Err(e) => {
                warn!("Failed to compute duplicate percentage: {}", e);
                None
            }
        };

        let null_percentages = match self.null_percentages(df) {
            Ok(percentages) => Some(percentages),
            Err(e) => {
                warn!("Failed to compute null percentages: {}", e);
                None
            }
        };

        let outliers = self.outlier_records(df, &classification.numerical);

        QualityReport {
            duplicate_percentage,
            null_percentages,
            outliers,
        }
    }

    /// Descriptive statistics for one numerical column over its non-null
    /// values.
    pub fn numeric_summary(&self, df: &DataFrame, column: &str) -> Result<NumericSummary> {
        let series = df.column(column)?.as_materialized_series();
        let mut values = numeric_values(series)?;
        if values.is_empty() {
            return Err(ProfilingError::NoValidValues(column.to_string()));
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        Ok(NumericSummary {
            column: column.to_string(),
            count: values.len(),
            mean: mean(&values),
            std: std_dev(&values),
            min: values[0],
            q25: percentile(&values, 25.0),
            median: percentile(&values, 50.0),
            q75: percentile(&values, 75.0),
            max: values[values.len() - 1],
        })
    }

    /// The `n` most frequent values of a column, most frequent first.
    ///
    /// Values are rendered as text so the same routine serves categorical and
    /// numeric columns. Ties preserve first-appearance order; null cells are
    /// not counted.
    pub fn top_value_counts(
        &self,
        df: &DataFrame,
        column: &str,
        n: usize,
    ) -> Result<Vec<CategoryCount>> {
        top_value_counts(df, column, n)
    }
}

/// Shared value-count routine backing both the summary tables and the count
/// plots.
pub(crate) fn top_value_counts(
    df: &DataFrame,
    column: &str,
    n: usize,
) -> Result<Vec<CategoryCount>> {
    let series = df.column(column)?.as_materialized_series();
    let as_string = series.cast(&DataType::String)?;
    let str_series = as_string.str()?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for value in str_series.into_iter().flatten() {
        match positions.get(value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(value.to_string(), counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);

    Ok(counts
        .into_iter()
        .map(|(value, count)| CategoryCount { value, count })
        .collect())
}
