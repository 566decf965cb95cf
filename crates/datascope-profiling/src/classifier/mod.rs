//! Column semantic-type classification.
//!
//! Three passes over a freshly loaded dataset:
//!
//! 1. **Sampled pattern detection** - each text column's leading rows are
//!    matched against the date patterns. A fully matching sample triggers a
//!    strict full-column parse to datetime; a partially matching sample is
//!    recorded as an [`AmbiguousColumn`] diagnostic and left untouched.
//! 2. **Keyword coercion** - columns whose name contains a calendar keyword
//!    (`year`, `month`, `day`) get a permissive per-cell parse where
//!    unparseable cells become missing.
//! 3. **Partition** - every column lands in the numerical, categorical, or
//!    datetime set (or none of them) based on its final element type.
//!
//! Classification is idempotent: a second run over an already-coerced frame
//! yields the same partition and performs no further mutation.

mod dates;

use crate::error::{ProfilingError, Result};
use crate::types::{AmbiguousColumn, ColumnClassification};
use crate::utils::{is_categorical_dtype, is_numeric_dtype, is_temporal_dtype};
use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

/// How many unmatched values an ambiguity diagnostic carries.
const AMBIGUOUS_EXAMPLE_COUNT: usize = 3;

/// Pluggable classification seam for the pipeline.
pub trait ClassificationStrategy {
    /// Classify the columns of `df`, coercing date-like text columns to
    /// datetime in place.
    fn classify(&self, df: &mut DataFrame) -> Result<ColumnClassification>;
}

/// Default classifier: sampled date-pattern matching plus keyword coercion.
#[derive(Debug, Clone)]
pub struct ColumnTypeClassifier {
    sample_limit: usize,
}

impl Default for ColumnTypeClassifier {
    fn default() -> Self {
        Self { sample_limit: 1000 }
    }
}

impl ColumnTypeClassifier {
    /// Create a classifier sampling at most `sample_limit` leading rows per
    /// text column.
    pub fn new(sample_limit: usize) -> Self {
        Self { sample_limit }
    }

    /// Sampled date-pattern pass over one text column.
    ///
    /// Returns the matched-row count and the indices of sampled rows that
    /// failed every pattern. Null cells count as unmatched.
    fn sample_date_patterns(&self, series: &Series) -> Result<(usize, Vec<usize>)> {
        let str_series = series.str()?;
        let mut matched = 0usize;
        let mut unmatched = Vec::new();

        for (idx, value) in str_series.into_iter().take(self.sample_limit).enumerate() {
            match value {
                Some(v) if dates::matches_date_pattern(v.trim()) => matched += 1,
                _ => unmatched.push(idx),
            }
        }

        Ok((matched, unmatched))
    }
}

impl ClassificationStrategy for ColumnTypeClassifier {
    fn classify(&self, df: &mut DataFrame) -> Result<ColumnClassification> {
        let column_names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();

        let mut ambiguous = Vec::new();

        // Pass 1: sampled date-pattern detection on text columns
        for name in &column_names {
            let series = df.column(name)?.as_materialized_series().clone();
            if series.dtype() != &DataType::String {
                continue;
            }

            let (matched, unmatched) = self.sample_date_patterns(&series)?;
            if matched > 0 && unmatched.is_empty() {
                match parse_column_strict(&series) {
                    Ok(parsed) => {
                        df.replace(name, parsed)?;
                        info!("Converted column '{}' to datetime", name);
                    }
                    Err(e) => {
                        // Sample looked temporal but the full column is not;
                        // leave the column as text.
                        debug!("Full datetime parse of '{}' failed: {}", name, e);
                    }
                }
            } else if matched > 0 {
                warn!(
                    "Column '{}' partially matches date patterns: {} sampled rows unmatched",
                    name,
                    unmatched.len()
                );
                let example_values = sample_unmatched_values(&series, &unmatched);
                ambiguous.push(AmbiguousColumn {
                    column: name.clone(),
                    unmatched_rows: unmatched,
                    example_values,
                });
            }
        }

        // Pass 2: keyword-named columns get a permissive coercion
        for name in &column_names {
            let lower = name.to_lowercase();
            if !dates::DATE_KEYWORDS.iter().any(|k| lower.contains(k)) {
                continue;
            }

            let series = df.column(name)?.as_materialized_series().clone();
            if is_temporal_dtype(series.dtype()) {
                continue;
            }

            match parse_column_permissive(&series) {
                Ok(coerced) => {
                    df.replace(name, coerced)?;
                    info!("Converted keyword column '{}' to datetime", name);
                }
                Err(e) => {
                    debug!("Permissive datetime coercion of '{}' failed: {}", name, e);
                }
            }
        }

        // Pass 3: partition by final element type
        let mut classification = ColumnClassification {
            ambiguous,
            ..ColumnClassification::default()
        };
        for name in &column_names {
            let dtype = df.column(name)?.dtype().clone();
            if is_numeric_dtype(&dtype) {
                classification.numerical.push(name.clone());
            } else if is_temporal_dtype(&dtype) {
                classification.datetime.push(name.clone());
            } else if is_categorical_dtype(&dtype) {
                classification.categorical.push(name.clone());
            } else {
                debug!("Column '{}' ({:?}) left unclassified", name, dtype);
            }
        }

        info!(
            "Classified {} columns: {} numerical, {} categorical, {} datetime",
            classification.classified_count(),
            classification.numerical.len(),
            classification.categorical.len(),
            classification.datetime.len()
        );
        Ok(classification)
    }
}

/// Strict full-column parse of a text column to datetime.
///
/// Every non-null cell must parse; the first failure aborts with
/// [`ProfilingError::TemporalParseFailed`] and the caller leaves the column
/// untouched. Null cells stay null.
fn parse_column_strict(series: &Series) -> Result<Series> {
    let str_series = series.str()?;
    let mut values: Vec<Option<i64>> = Vec::with_capacity(str_series.len());

    for value in str_series.into_iter() {
        match value {
            Some(v) => match dates::parse_date_strict(v.trim()) {
                Some(ms) => values.push(Some(ms)),
                None => {
                    return Err(ProfilingError::TemporalParseFailed {
                        column: series.name().to_string(),
                        reason: format!("value '{v}' does not parse as a date"),
                    });
                }
            },
            None => values.push(None),
        }
    }

    let ms_series = Series::new(series.name().clone(), values);
    Ok(ms_series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
}

/// Permissive full-column parse for keyword-named columns.
///
/// The column is first rendered as text so numeric year columns coerce too.
/// Cells that fail to parse become missing instead of failing the column.
fn parse_column_permissive(series: &Series) -> Result<Series> {
    let as_string = series.cast(&DataType::String)?;
    let str_series = as_string.str()?;
    let mut values: Vec<Option<i64>> = Vec::with_capacity(str_series.len());

    for value in str_series.into_iter() {
        values.push(value.and_then(|v| dates::parse_date_permissive(v.trim())));
    }

    let ms_series = Series::new(series.name().clone(), values);
    Ok(ms_series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
}

/// Pick a few unmatched values for the ambiguity diagnostic.
///
/// Seeded, so the same column always produces the same examples.
fn sample_unmatched_values(series: &Series, unmatched: &[usize]) -> Vec<String> {
    let Ok(str_series) = series.str() else {
        return Vec::new();
    };

    let mut rng = StdRng::seed_from_u64(42);
    let sample_size = unmatched.len().min(AMBIGUOUS_EXAMPLE_COUNT);
    unmatched
        .choose_multiple(&mut rng, sample_size)
        .filter_map(|&idx| str_series.get(idx).map(|v| v.to_string()))
        .collect()
}

/// Collapse binary indicator columns into the categorical family.
///
/// Numeric columns whose non-null values are exactly `{0, 1}` are rewritten
/// as text columns with values `"0"` and `"1"`; text columns already holding
/// exactly `{"0", "1"}` are reported without modification. Returns the
/// affected column names. Idempotent: a second run reports the same columns
/// and changes nothing.
pub fn collapse_binary_columns(df: &mut DataFrame) -> Result<Vec<String>> {
    let column_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|n| n.to_string())
        .collect();

    let mut collapsed = Vec::new();
    for name in &column_names {
        let series = df.column(name)?.as_materialized_series().clone();

        if is_numeric_dtype(series.dtype()) {
            let float = series.cast(&DataType::Float64)?;
            let chunked = float.f64()?;

            let mut distinct: Vec<f64> = Vec::new();
            for v in chunked.into_iter().flatten() {
                if !distinct.contains(&v) {
                    distinct.push(v);
                }
                if distinct.len() > 2 {
                    break;
                }
            }

            if distinct.len() == 2 && distinct.contains(&0.0) && distinct.contains(&1.0) {
                let values: Vec<Option<String>> = chunked
                    .into_iter()
                    .map(|v| v.map(|x| if x == 0.0 { "0".to_string() } else { "1".to_string() }))
                    .collect();
                df.replace(name, Series::new(series.name().clone(), values))?;
                info!("Collapsed binary column '{}' to categorical", name);
                collapsed.push(name.clone());
            }
        } else if series.dtype() == &DataType::String {
            let str_series = series.str()?;

            let mut distinct: Vec<&str> = Vec::new();
            for v in str_series.into_iter().flatten() {
                if !distinct.contains(&v) {
                    distinct.push(v);
                }
                if distinct.len() > 2 {
                    break;
                }
            }

            if distinct.len() == 2 && distinct.contains(&"0") && distinct.contains(&"1") {
                // Already in the categorical family; just record it
                collapsed.push(name.clone());
            }
        }
    }

    Ok(collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ==================== classification tests ====================

    #[test]
    fn test_classify_basic_partition() {
        let mut df = df![
            "age" => [30i64, 41, 25],
            "city" => ["Cairo", "Lagos", "Nairobi"],
            "active" => [true, false, true],
        ]
        .unwrap();

        let classification = ColumnTypeClassifier::default().classify(&mut df).unwrap();

        assert_eq!(classification.numerical, vec!["age".to_string()]);
        assert_eq!(classification.categorical, vec!["city".to_string()]);
        assert!(classification.datetime.is_empty());
        // Boolean columns land in no set
        assert!(!classification.contains("active"));
        assert!(classification.is_disjoint());
    }

    #[test]
    fn test_classify_date_column_coerced() {
        let mut df = df![
            "signup" => ["2024-01-15", "2024-02-20", "2024-03-25"],
            "name" => ["a", "b", "c"],
        ]
        .unwrap();

        let classification = ColumnTypeClassifier::default().classify(&mut df).unwrap();

        assert_eq!(classification.datetime, vec!["signup".to_string()]);
        assert_eq!(classification.categorical, vec!["name".to_string()]);
        assert!(is_temporal_dtype(df.column("signup").unwrap().dtype()));
    }

    #[test]
    fn test_classify_date_with_time_suffix() {
        let mut df = df![
            "ts" => ["2024-01-15 10:30:00", "2024-01-16 11:00:00"],
        ]
        .unwrap();

        let classification = ColumnTypeClassifier::default().classify(&mut df).unwrap();
        assert_eq!(classification.datetime, vec!["ts".to_string()]);
    }

    #[test]
    fn test_classify_partial_match_is_ambiguous() {
        let mut df = df![
            "mixed" => ["2024-01-15", "hello", "2024-03-25", "world"],
        ]
        .unwrap();

        let classification = ColumnTypeClassifier::default().classify(&mut df).unwrap();

        // Column stays categorical, with a diagnostic
        assert_eq!(classification.categorical, vec!["mixed".to_string()]);
        assert_eq!(classification.ambiguous.len(), 1);
        let diag = &classification.ambiguous[0];
        assert_eq!(diag.column, "mixed");
        assert_eq!(diag.unmatched_rows, vec![1, 3]);
        assert!(!diag.example_values.is_empty());
        for example in &diag.example_values {
            assert!(["hello", "world"].contains(&example.as_str()));
        }
    }

    #[test]
    fn test_classify_no_match_left_untouched() {
        let mut df = df![
            "text" => ["alpha", "beta", "gamma"],
        ]
        .unwrap();

        let classification = ColumnTypeClassifier::default().classify(&mut df).unwrap();
        assert_eq!(classification.categorical, vec!["text".to_string()]);
        assert!(classification.ambiguous.is_empty());
    }

    #[test]
    fn test_classify_keyword_column_permissive() {
        let mut df = df![
            "order_year" => ["2020", "not_a_year", "2021"],
        ]
        .unwrap();

        let classification = ColumnTypeClassifier::default().classify(&mut df).unwrap();

        assert_eq!(classification.datetime, vec!["order_year".to_string()]);
        // The unparseable cell became missing
        assert_eq!(df.column("order_year").unwrap().null_count(), 1);
    }

    #[test]
    fn test_classify_keyword_skips_already_temporal() {
        let mut df = df![
            "year_col" => ["2020-01-01", "2021-01-01"],
        ]
        .unwrap();

        // First run coerces via the pattern pass; the keyword pass must then
        // skip the already-temporal column
        let classifier = ColumnTypeClassifier::default();
        let first = classifier.classify(&mut df).unwrap();
        assert_eq!(first.datetime, vec!["year_col".to_string()]);

        let second = classifier.classify(&mut df).unwrap();
        assert_eq!(second.datetime, first.datetime);
        assert!(second.ambiguous.is_empty());
    }

    #[test]
    fn test_classify_idempotent() {
        let mut df = df![
            "age" => [30i64, 41],
            "city" => ["Cairo", "Lagos"],
            "signup" => ["2024-01-15", "2024-02-20"],
        ]
        .unwrap();

        let classifier = ColumnTypeClassifier::default();
        let first = classifier.classify(&mut df).unwrap();
        let snapshot = df.clone();
        let second = classifier.classify(&mut df).unwrap();

        assert_eq!(first.numerical, second.numerical);
        assert_eq!(first.categorical, second.categorical);
        assert_eq!(first.datetime, second.datetime);
        assert!(df.equals_missing(&snapshot));
    }

    #[test]
    fn test_classify_sample_cap_guards_full_parse() {
        // All sampled rows match, but a row beyond the cap is invalid; the
        // strict full-column parse fails and the column stays text.
        let mut df = df![
            "d" => ["2024-01-15", "2024-01-16", "garbage"],
        ]
        .unwrap();

        let classification = ColumnTypeClassifier::new(2).classify(&mut df).unwrap();
        assert_eq!(classification.categorical, vec!["d".to_string()]);
        assert!(classification.datetime.is_empty());
    }

    #[test]
    fn test_classify_all_null_text_column() {
        let mut df = df![
            "empty" => [None::<&str>, None, None],
        ]
        .unwrap();

        let classification = ColumnTypeClassifier::default().classify(&mut df).unwrap();
        // No match, no ambiguity
        assert_eq!(classification.categorical, vec!["empty".to_string()]);
        assert!(classification.ambiguous.is_empty());
    }

    // ==================== collapse_binary_columns tests ====================

    #[test]
    fn test_collapse_binary_numeric() {
        let mut df = df![
            "flag" => [0i64, 1, 0, 1],
            "age" => [30i64, 41, 25, 19],
        ]
        .unwrap();

        let collapsed = collapse_binary_columns(&mut df).unwrap();
        assert_eq!(collapsed, vec!["flag".to_string()]);
        assert_eq!(df.column("flag").unwrap().dtype(), &DataType::String);
        // Non-binary numeric column untouched
        assert!(is_numeric_dtype(df.column("age").unwrap().dtype()));

        let flag = df.column("flag").unwrap().as_materialized_series();
        let values: Vec<&str> = flag.str().unwrap().into_iter().flatten().collect();
        assert_eq!(values, vec!["0", "1", "0", "1"]);
    }

    #[test]
    fn test_collapse_binary_string_reported_only() {
        let mut df = df![
            "flag" => ["0", "1", "1"],
        ]
        .unwrap();

        let collapsed = collapse_binary_columns(&mut df).unwrap();
        assert_eq!(collapsed, vec!["flag".to_string()]);
        assert_eq!(df.column("flag").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_collapse_binary_idempotent() {
        let mut df = df![
            "flag" => [0i64, 1, 1],
        ]
        .unwrap();

        let first = collapse_binary_columns(&mut df).unwrap();
        let snapshot = df.clone();
        let second = collapse_binary_columns(&mut df).unwrap();

        assert_eq!(first, second);
        assert!(df.equals_missing(&snapshot));
    }

    #[test]
    fn test_collapse_skips_non_binary() {
        let mut df = df![
            "ternary" => [0i64, 1, 2],
            "constant" => [1i64, 1, 1],
        ]
        .unwrap();

        let collapsed = collapse_binary_columns(&mut df).unwrap();
        assert!(collapsed.is_empty());
    }
}
