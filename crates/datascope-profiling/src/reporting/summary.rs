//! Summary report flow: quality statistics and per-column tables.

use super::REPORT_TITLE;
use crate::error::{ProfilingError, Result};
use crate::quality::DataQualityProfiler;
use crate::session::ensure_directory;
use crate::types::{ColumnClassification, QualityReport};
use crate::utils::file_stem;
use datascope_report::Document;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Assemble and save the summary document as
/// `eda_report_summary_{stem}.html` under the output root.
///
/// Block order: column-type table, duplicate percentage, null percentages,
/// outlier table, then a page break, then per-column detail (numerical
/// statistics followed by categorical value counts). A column whose
/// statistics cannot be computed is logged and omitted.
pub fn build_summary_report(
    df: &DataFrame,
    classification: &ColumnClassification,
    quality: &QualityReport,
    profiler: &DataQualityProfiler,
    top_n: usize,
    output_root: &Path,
    input_path: &Path,
) -> Result<PathBuf> {
    let mut document = Document::new(REPORT_TITLE);

    add_column_types(&mut document, classification);
    add_quality_blocks(&mut document, quality);
    document.add_page_break();
    add_numeric_details(&mut document, df, classification, profiler);
    add_categorical_details(&mut document, df, classification, profiler, top_n);

    ensure_directory(output_root)?;
    let path = output_root.join(format!("eda_report_summary_{}.html", file_stem(input_path)));
    document
        .save_to_file(&path)
        .map_err(|e| ProfilingError::ReportGenerationFailed(e.to_string()))?;

    info!("Saved summary report to {}", path.display());
    Ok(path)
}

fn add_column_types(document: &mut Document, classification: &ColumnClassification) {
    let mut rows = Vec::new();
    for (label, columns) in [
        ("Numerical Columns", &classification.numerical),
        ("Categorical Columns", &classification.categorical),
        ("Datetime Columns", &classification.datetime),
    ] {
        if !columns.is_empty() {
            rows.push(vec![label.to_string(), columns.join(", ")]);
        }
    }

    document.add_description("Column Types:");
    document.add_table(vec!["Type".to_string(), "Column Names".to_string()], rows);
}

fn add_quality_blocks(document: &mut Document, quality: &QualityReport) {
    if let Some(pct) = quality.duplicate_percentage {
        document.add_description("Duplicate Percentage:");
        document.add_table(
            vec!["Metric".to_string(), "Percentage".to_string()],
            vec![vec!["Duplicate Percentage".to_string(), format!("{pct:.2}%")]],
        );
    }

    if let Some(percentages) = &quality.null_percentages {
        document.add_description("Null Percentage:");
        let rows = percentages
            .iter()
            .map(|entry| vec![entry.column.clone(), format!("{:.2}%", entry.percentage)])
            .collect();
        document.add_table(
            vec!["Column Name".to_string(), "Percentage".to_string()],
            rows,
        );
    }

    if !quality.outliers.is_empty() {
        document.add_description("Outliers:");
        let rows = quality
            .outliers
            .iter()
            .map(|record| {
                vec![
                    record.column.clone(),
                    format!("{:.2}%", record.outlier_fraction * 100.0),
                    record.outlier_count.to_string(),
                ]
            })
            .collect();
        document.add_table(
            vec![
                "Column Name".to_string(),
                "Percentage of Outliers".to_string(),
                "Number of Outliers".to_string(),
            ],
            rows,
        );
    }
}

fn add_numeric_details(
    document: &mut Document,
    df: &DataFrame,
    classification: &ColumnClassification,
    profiler: &DataQualityProfiler,
) {
    for column in &classification.numerical {
        let summary = match profiler.numeric_summary(df, column) {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Skipping statistics for column '{}': {}", column, e);
                continue;
            }
        };

        document.add_description(&format!("Statistics for {column}:"));
        let rows = vec![
            vec!["count".to_string(), summary.count.to_string()],
            vec!["mean".to_string(), format!("{:.2}", summary.mean)],
            vec!["std".to_string(), format!("{:.2}", summary.std)],
            vec!["min".to_string(), format!("{:.2}", summary.min)],
            vec!["25%".to_string(), format!("{:.2}", summary.q25)],
            vec!["50%".to_string(), format!("{:.2}", summary.median)],
            vec!["75%".to_string(), format!("{:.2}", summary.q75)],
            vec!["max".to_string(), format!("{:.2}", summary.max)],
        ];
        document.add_table(vec!["Statistic".to_string(), "Value".to_string()], rows);
    }
}

fn add_categorical_details(
    document: &mut Document,
    df: &DataFrame,
    classification: &ColumnClassification,
    profiler: &DataQualityProfiler,
    top_n: usize,
) {
    for column in &classification.categorical {
        let counts = match profiler.top_value_counts(df, column, top_n) {
            Ok(counts) => counts,
            Err(e) => {
                warn!("Skipping value counts for column '{}': {}", column, e);
                continue;
            }
        };

        document.add_description(&format!("Top {top_n} Value Counts for {column}:"));
        let rows = counts
            .into_iter()
            .map(|entry| vec![entry.value, entry.count.to_string()])
            .collect();
        document.add_table(vec!["Category".to_string(), "Count".to_string()], rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> (DataFrame, ColumnClassification) {
        let df = df![
            "age" => [Some(30.0f64), Some(41.0), None, Some(30.0), None],
            "city" => ["Cairo", "Lagos", "Nairobi", "Cairo", "Accra"],
        ]
        .unwrap();
        let classification = ColumnClassification {
            numerical: vec!["age".to_string()],
            categorical: vec!["city".to_string()],
            ..ColumnClassification::default()
        };
        (df, classification)
    }

    #[test]
    fn test_summary_report_block_order() {
        let root = tempfile::tempdir().unwrap();
        let (df, classification) = fixture();
        let profiler = DataQualityProfiler::default();
        let quality = profiler.quality_report(&df, &classification);

        let path = build_summary_report(
            &df,
            &classification,
            &quality,
            &profiler,
            10,
            root.path(),
            Path::new("data/train.csv"),
        )
        .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "eda_report_summary_train.html"
        );

        let html = std::fs::read_to_string(&path).unwrap();
        let positions: Vec<usize> = [
            "Column Types:",
            "Duplicate Percentage:",
            "20.00%",
            "Null Percentage:",
            "Outliers:",
            "Statistics for age:",
            "Top 10 Value Counts for city:",
        ]
        .iter()
        .map(|needle| html.find(needle).unwrap_or_else(|| panic!("missing block: {needle}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        // The "age" column is 40% null
        assert!(html.contains("40.00%"));
    }

    #[test]
    fn test_summary_report_skips_failing_columns() {
        let root = tempfile::tempdir().unwrap();
        let df = df!["empty" => [None::<f64>, None]].unwrap();
        let classification = ColumnClassification {
            numerical: vec!["empty".to_string()],
            ..ColumnClassification::default()
        };
        let profiler = DataQualityProfiler::default();
        let quality = profiler.quality_report(&df, &classification);

        let path = build_summary_report(
            &df,
            &classification,
            &quality,
            &profiler,
            10,
            root.path(),
            Path::new("x.csv"),
        )
        .unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(!html.contains("Statistics for empty:"));
    }
}
