//! Custom error types for the profiling pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Input errors
//! (unreadable or structurally invalid datasets) abort the session; everything
//! else is caught near where it happens, logged, and reduced to an empty
//! result for that statistic or chart.
//!
//! Errors are serializable so the CLI can embed them in JSON output.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for profiling operations.
#[derive(Error, Debug)]
pub enum ProfilingError {
    /// Input file extension is not a supported tabular format.
    #[error("Unsupported input format: '{0}' (expected .csv or .parquet)")]
    UnsupportedFormat(String),

    /// Dataset has no rows or no columns.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No valid values found in a column for computation.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// Full-column temporal parse failed.
    #[error("Failed to parse column '{column}' as temporal values: {reason}")]
    TemporalParseFailed { column: String, reason: String },

    /// Feature scaling or encoding failed for a column.
    #[error("Failed to encode column '{column}': {reason}")]
    EncodingFailed { column: String, reason: String },

    /// Chart generation failed.
    #[error("Failed to generate chart '{title}': {reason}")]
    ChartGenerationFailed { title: String, reason: String },

    /// Document assembly or persistence failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProfilingError>,
    },
}

impl ProfilingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProfilingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::NoValidValues(_) => "NO_VALID_VALUES",
            Self::TemporalParseFailed { .. } => "TEMPORAL_PARSE_FAILED",
            Self::EncodingFailed { .. } => "ENCODING_FAILED",
            Self::ChartGenerationFailed { .. } => "CHART_GENERATION_FAILED",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is an unrecoverable input error.
    ///
    /// Input errors abort the session; every other error is isolated to the
    /// statistic, column, or chart that raised it.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::UnsupportedFormat(_) | Self::EmptyDataset | Self::Io(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ProfilingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ProfilingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfilingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ProfilingError::Polars(e).with_context(context))
    }
}
