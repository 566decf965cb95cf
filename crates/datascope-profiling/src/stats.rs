//! Numeric helpers shared by the quality profiler, the visualizer, and the
//! encode/scale step.
//!
//! Everything here works on plain `f64` values extracted from a column, so
//! the same routines back chart annotations, summary tables, and outlier
//! fences.

use crate::error::Result;
use polars::prelude::*;

/// Extract the non-null values of a column as `f64`.
pub(crate) fn numeric_values(series: &Series) -> Result<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().flatten().collect())
}

/// Extract all values of a column as `Option<f64>`, preserving positions.
///
/// Used where row alignment matters (correlation pairing, outlier indices).
pub(crate) fn numeric_options(series: &Series) -> Result<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().collect())
}

/// Arithmetic mean. Empty input yields 0.0.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator).
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Third standardized moment. Zero-variance input yields 0.0.
pub(crate) fn skewness(values: &[f64]) -> f64 {
    let std = std_dev(values);
    if std == 0.0 || values.is_empty() {
        return 0.0;
    }

    let m = mean(values);
    let n = values.len() as f64;
    values.iter().map(|v| ((v - m) / std).powi(3)).sum::<f64>() / n
}

/// Excess kurtosis (fourth standardized moment minus 3).
pub(crate) fn kurtosis(values: &[f64]) -> f64 {
    let std = std_dev(values);
    if std == 0.0 || values.is_empty() {
        return 0.0;
    }

    let m = mean(values);
    let n = values.len() as f64;
    values.iter().map(|v| ((v - m) / std).powi(4)).sum::<f64>() / n - 3.0
}

/// Percentile of a sorted slice using linear interpolation between ranks.
///
/// `p` is in [0, 100]. The slice must be sorted ascending and non-empty.
pub(crate) fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }

    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Pearson correlation over paired observations.
///
/// Returns NaN when fewer than two pairs exist or either side has zero
/// variance, matching how correlation tables display degenerate columns.
pub(crate) fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len() as f64;
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Pairwise-complete Pearson correlation matrix over the given columns.
///
/// Rows containing a missing value in either column of a pair are skipped
/// for that pair only.
pub(crate) fn correlation_matrix(df: &DataFrame, columns: &[String]) -> Result<Vec<Vec<f64>>> {
    let mut column_values = Vec::with_capacity(columns.len());
    for name in columns {
        let series = df.column(name)?.as_materialized_series();
        column_values.push(numeric_options(series)?);
    }

    let mut matrix = vec![vec![f64::NAN; columns.len()]; columns.len()];
    for i in 0..columns.len() {
        matrix[i][i] = 1.0;
        for j in (i + 1)..columns.len() {
            let pairs: Vec<(f64, f64)> = column_values[i]
                .iter()
                .zip(column_values[j].iter())
                .filter_map(|(a, b)| a.zip(*b))
                .collect();
            let r = pearson(&pairs);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    Ok(matrix)
}
