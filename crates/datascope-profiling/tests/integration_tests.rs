//! End-to-end tests of the profiling pipeline against real files on disk.

use datascope_profiling::{
    ColumnTypeClassifier, ClassificationStrategy, ProfilePipeline, ProfilerConfig, ReportKind,
    SESSION_DIR_PREFIX, read_file_to_dataframe,
};
use polars::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Fixture with one exact duplicate row (20%), a 20%-null numeric column,
/// a date column, and a keyword year column containing one bad value.
const FIXTURE_CSV: &str = "\
age,city,signup,order_year
30,Cairo,2024-01-15,2020
41,Lagos,2024-02-20,not_a_year
25,Cairo,2024-03-25,2021
30,Cairo,2024-01-15,2020
,Accra,2024-05-10,2022
";

fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("train.csv");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(FIXTURE_CSV.as_bytes()).unwrap();
    path
}

fn pipeline(output_dir: &Path, kind: ReportKind) -> ProfilePipeline {
    let config = ProfilerConfig::builder()
        .output_dir(output_dir)
        .report_kind(kind)
        .build()
        .unwrap();
    ProfilePipeline::new(config).unwrap()
}

fn session_dirs(output_dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(output_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(SESSION_DIR_PREFIX))
        })
        .collect()
}

#[test]
fn test_end_to_end_profile() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("out");

    let outcome = pipeline(&output, ReportKind::Both)
        .profile_file(&input)
        .unwrap();

    assert_eq!(outcome.shape, (5, 4));

    // Classification: age numeric, city categorical, both date-ish columns
    // coerced to datetime
    assert_eq!(outcome.classification.numerical, vec!["age".to_string()]);
    assert_eq!(outcome.classification.categorical, vec!["city".to_string()]);
    assert_eq!(
        outcome.classification.datetime,
        vec!["signup".to_string(), "order_year".to_string()]
    );
    assert!(outcome.classification.is_disjoint());

    // Quality statistics
    assert_eq!(outcome.quality.duplicate_percentage, Some(20.0));
    let nulls = outcome.quality.null_percentages.unwrap();
    let age_nulls = nulls.iter().find(|e| e.column == "age").unwrap();
    assert_eq!(age_nulls.percentage, 20.0);
    // The bad "order_year" cell became missing during coercion
    let year_nulls = nulls.iter().find(|e| e.column == "order_year").unwrap();
    assert_eq!(year_nulls.percentage, 20.0);

    // Documents and the scaled dataset
    let visual = outcome.visual_report.unwrap();
    let summary = outcome.summary_report.unwrap();
    let scaled = outcome.scaled_output.unwrap();
    assert!(visual.is_file());
    assert!(summary.is_file());
    assert_eq!(
        scaled.file_name().unwrap().to_str().unwrap(),
        "train_scaled.csv"
    );

    // 1 count plot + 3 numerical charts for "age" (no heatmap with a single
    // numerical column)
    assert_eq!(outcome.artifacts.len(), 4);
    assert!(outcome.artifacts.iter().all(|p| p.is_file()));
}

#[test]
fn test_single_session_directory_per_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("out");

    let outcome = pipeline(&output, ReportKind::Visual)
        .profile_file(&input)
        .unwrap();

    let sessions = session_dirs(&output);
    assert_eq!(sessions.len(), 1);

    // Every chart lives inside that one session directory
    for artifact in &outcome.artifacts {
        assert_eq!(artifact.parent().unwrap(), sessions[0]);
    }
    // The document itself sits at the output root, not in the session dir
    assert_eq!(
        outcome.visual_report.unwrap().parent().unwrap(),
        output.as_path()
    );
}

#[test]
fn test_summary_document_contents() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("out");

    let outcome = pipeline(&output, ReportKind::Summary)
        .profile_file(&input)
        .unwrap();

    let html = fs::read_to_string(outcome.summary_report.unwrap()).unwrap();
    assert!(html.contains("Exploratory Data Analysis Results"));
    assert!(html.contains("Column Types:"));
    assert!(html.contains("Duplicate Percentage:"));
    assert!(html.contains("20.00%"));
    assert!(html.contains("Statistics for age:"));
    assert!(html.contains("Top 10 Value Counts for city:"));
    // Cairo appears three times in the fixture
    assert!(html.contains("Cairo"));

    // Summary-only runs save no charts
    assert!(outcome.artifacts.is_empty());
    assert!(session_dirs(&output).is_empty());
}

#[test]
fn test_scaled_output_readable_and_encoded() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("out");

    let outcome = pipeline(&output, ReportKind::Summary)
        .profile_file(&input)
        .unwrap();

    let scaled = read_file_to_dataframe(&outcome.scaled_output.unwrap()).unwrap();
    assert_eq!(scaled.height(), 5);

    // "city" was integer-encoded by sorted category order:
    // Accra=0, Cairo=1, Lagos=2
    let codes: Vec<i64> = scaled
        .column("city")
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(codes, vec![1, 2, 1, 1, 0]);

    // "age" was standardized: non-null values sum to ~0
    let ages: Vec<f64> = scaled
        .column("age")
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert!(ages.iter().sum::<f64>().abs() < 1e-6);
    // The null cell survived the transform
    assert_eq!(scaled.column("age").unwrap().null_count(), 1);
}

#[test]
fn test_classification_idempotent_on_loaded_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());

    let mut df = read_file_to_dataframe(&input).unwrap();
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
fn test_unsupported_input_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    fs::write(&path, "not a dataset").unwrap();

    let err = pipeline(dir.path(), ReportKind::Both)
        .profile_file(&path)
        .unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn test_outcome_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("out");

    let outcome = pipeline(&output, ReportKind::Summary)
        .profile_file(&input)
        .unwrap();

    let json = serde_json::to_string_pretty(&outcome).unwrap();
    assert!(json.contains("\"duplicate_percentage\""));
    assert!(json.contains("\"numerical\""));

    let parsed: datascope_profiling::ProfileOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.shape, outcome.shape);
}
