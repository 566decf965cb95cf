//! Destructive model-prep transform: feature scaling and categorical
//! encoding.
//!
//! Runs strictly after every read-only consumer of the dataset. Numerical
//! columns are standardized in place; categorical columns are replaced by
//! integer codes. Column failures are isolated: a column that cannot be
//! transformed is logged and left as-is.

use crate::error::{ProfilingError, Result};
use crate::session::ensure_directory;
use crate::stats::{mean, numeric_options, std_dev};
use crate::types::ColumnClassification;
use crate::utils::file_stem;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Standardize numerical columns and integer-encode categorical columns in
/// place. Returns the names of the columns actually transformed.
///
/// Standardization maps each value to `(x - mean) / std` over the column's
/// non-null values; zero-variance columns are skipped. Encoding assigns each
/// distinct category its rank in sorted order. Null cells stay null in both
/// cases.
pub fn encode_and_scale(
    df: &mut DataFrame,
    classification: &ColumnClassification,
) -> Result<Vec<String>> {
    let mut transformed = Vec::new();

    for column in &classification.numerical {
        match scale_column(df, column) {
            Ok(true) => transformed.push(column.clone()),
            Ok(false) => {}
            Err(e) => warn!("Skipping scaling of column '{}': {}", column, e),
        }
    }

    for column in &classification.categorical {
        match encode_column(df, column) {
            Ok(()) => transformed.push(column.clone()),
            Err(e) => warn!("Skipping encoding of column '{}': {}", column, e),
        }
    }

    info!("Transformed {} columns for modeling", transformed.len());
    Ok(transformed)
}

/// Standardize one column. Returns false when the column has zero variance
/// and was left untouched.
fn scale_column(df: &mut DataFrame, column: &str) -> Result<bool> {
    let series = df.column(column)?.as_materialized_series().clone();
    let values = numeric_options(&series)?;
    let non_null: Vec<f64> = values.iter().flatten().copied().collect();
    if non_null.is_empty() {
        return Err(ProfilingError::NoValidValues(column.to_string()));
    }

    let m = mean(&non_null);
    let std = std_dev(&non_null);
    if std == 0.0 {
        warn!("Column '{}' has zero variance; not scaled", column);
        return Ok(false);
    }

    let scaled: Vec<Option<f64>> = values.iter().map(|v| v.map(|x| (x - m) / std)).collect();
    df.replace(column, Series::new(series.name().clone(), scaled))?;
    Ok(true)
}

/// Replace one categorical column with integer codes assigned by sorted
/// category order.
fn encode_column(df: &mut DataFrame, column: &str) -> Result<()> {
    let series = df.column(column)?.as_materialized_series().clone();
    let as_string = series.cast(&DataType::String).map_err(|e| {
        ProfilingError::EncodingFailed {
            column: column.to_string(),
            reason: e.to_string(),
        }
    })?;
    let str_series = as_string.str()?;

    let mut distinct: Vec<&str> = Vec::new();
    for value in str_series.into_iter().flatten() {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    distinct.sort_unstable();

    let codes: Vec<Option<i64>> = str_series
        .into_iter()
        .map(|value| {
            value.map(|v| {
                distinct.iter().position(|d| *d == v).unwrap_or_default() as i64
            })
        })
        .collect();

    df.replace(column, Series::new(series.name().clone(), codes))?;
    Ok(())
}

/// Persist the transformed dataset as `{input stem}_scaled.csv` under the
/// output root.
pub fn write_scaled_csv(
    df: &mut DataFrame,
    output_root: &Path,
    input_path: &Path,
) -> Result<PathBuf> {
    ensure_directory(output_root)?;
    let path = output_root.join(format!("{}_scaled.csv", file_stem(input_path)));

    let mut file = File::create(&path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)?;

    info!("Saved transformed dataset to {}", path.display());
    Ok(path)
}
