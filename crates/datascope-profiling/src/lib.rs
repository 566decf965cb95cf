//! Tabular Dataset Profiling Library
//!
//! Automated exploratory data analysis built on Polars.
//!
//! # Overview
//!
//! This library profiles a tabular dataset end to end:
//!
//! - **Column Classification**: Infers the semantic type of every column
//!   (numerical, categorical, datetime), coercing date-like text columns in
//!   place and flagging ambiguous ones
//! - **Quality Statistics**: Duplicate percentage, per-column null
//!   percentages, and pluggable outlier detection
//! - **Visualization**: Box plots, density plots, annotated histograms,
//!   count plots, and a correlation heatmap, saved into a timestamped
//!   session directory
//! - **Report Documents**: A chart-only visual document and a
//!   statistics-and-tables summary document, assembled from one
//!   classification pass
//! - **Model Prep**: Optional feature scaling and categorical encoding,
//!   persisted as `{stem}_scaled.csv`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use datascope_profiling::{ProfilePipeline, ProfilerConfig, ReportKind};
//! use std::path::Path;
//!
//! let config = ProfilerConfig::builder()
//!     .output_dir("output")
//!     .report_kind(ReportKind::Both)
//!     .build()?;
//!
//! let outcome = ProfilePipeline::new(config)?.profile_file(Path::new("train.csv"))?;
//!
//! println!("Shape: {:?}", outcome.shape);
//! println!("Numerical columns: {:?}", outcome.classification.numerical);
//! if let Some(report) = outcome.summary_report {
//!     println!("Summary report: {}", report.display());
//! }
//! ```
//!
//! # Extension Seams
//!
//! Both analysis strategies are pluggable through the pipeline builder:
//!
//! ```rust,ignore
//! use datascope_profiling::{ProfilePipeline, IqrOutlierDetector};
//!
//! let pipeline = ProfilePipeline::builder()
//!     .detector(Box::new(IqrOutlierDetector))
//!     .build()?;
//! ```
//!
//! See [`classifier::ClassificationStrategy`] and [`quality::OutlierDetector`].

pub mod classifier;
pub mod config;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod quality;
pub mod reporting;
pub mod session;
pub mod transform;
pub mod types;
pub mod utils;
pub mod viz;

mod stats;

// Re-exports for convenient access
pub use classifier::{ClassificationStrategy, ColumnTypeClassifier, collapse_binary_columns};
pub use config::{ConfigValidationError, ProfilerConfig, ProfilerConfigBuilder, ReportKind};
pub use error::{ProfilingError, Result as ProfilingResult, ResultExt};
pub use ingest::read_file_to_dataframe;
pub use pipeline::{ProfilePipeline, ProfilePipelineBuilder};
pub use quality::{DataQualityProfiler, IqrOutlierDetector, OutlierDetector};
pub use reporting::{build_summary_report, build_visual_report};
pub use session::{OutputSession, SESSION_DIR_PREFIX, ensure_directory};
pub use transform::{encode_and_scale, write_scaled_csv};
pub use types::{
    AmbiguousColumn, CategoryCount, ColumnClassification, ColumnNullPercentage, NumericSummary,
    OutlierRecord, ProfileOutcome, QualityReport,
};
pub use utils::{file_stem, is_categorical_dtype, is_numeric_dtype, is_temporal_dtype, round2};
pub use viz::{ChartArtifact, ChartOutcome, OutputMode, VisualizationGenerator};
