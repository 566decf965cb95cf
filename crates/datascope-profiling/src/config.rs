//! Configuration types for the profiling pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which document flows a profiling run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReportKind {
    /// Chart-only document (count plots, distribution plots, heatmap).
    Visual,
    /// Text-and-table document plus the encode/scale output.
    Summary,
    /// Both documents from one classification pass.
    #[default]
    Both,
}

impl ReportKind {
    pub fn includes_visual(self) -> bool {
        matches!(self, ReportKind::Visual | ReportKind::Both)
    }

    pub fn includes_summary(self) -> bool {
        matches!(self, ReportKind::Summary | ReportKind::Both)
    }
}

/// Configuration for the profiling pipeline.
///
/// Use [`ProfilerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use datascope_profiling::config::{ProfilerConfig, ReportKind};
///
/// let config = ProfilerConfig::builder()
///     .output_dir("reports")
///     .report_kind(ReportKind::Summary)
///     .top_n(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Root directory for documents, the scaled dataset, and the
    /// timestamped chart session directory.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// Maximum number of leading rows sampled when evaluating a text
    /// column against the date patterns. Columns whose date-like rows
    /// start after this cap are misclassified; this is a documented
    /// cost/completeness trade-off.
    /// Default: 1000
    pub sample_limit: usize,

    /// Sensitivity passed to the outlier detector: a row must be flagged
    /// in more than this many columns of the profiled subset to count.
    /// Default: 0
    pub outlier_sensitivity: usize,

    /// Number of most frequent categories shown in count plots and
    /// value-count tables.
    /// Default: 10
    pub top_n: usize,

    /// Bin count for numerical histograms.
    /// Default: 10
    pub histogram_bins: usize,

    /// Whether the summary flow runs the destructive encode/scale step
    /// and persists the transformed dataset.
    /// Default: true
    pub scale_features: bool,

    /// Which document flow(s) to produce.
    /// Default: Both
    pub report_kind: ReportKind,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            sample_limit: 1000,
            outlier_sensitivity: 0,
            top_n: 10,
            histogram_bins: 10,
            scale_features: true,
            report_kind: ReportKind::default(),
        }
    }
}

impl ProfilerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.sample_limit == 0 {
            return Err(ConfigValidationError::InvalidSampleLimit(self.sample_limit));
        }

        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_n));
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidHistogramBins(
                self.histogram_bins,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid sample limit: {0} (must be at least 1)")]
    InvalidSampleLimit(usize),

    #[error("Invalid top-N category count: {0} (must be at least 1)")]
    InvalidTopN(usize),

    #[error("Invalid histogram bin count: {0} (must be at least 1)")]
    InvalidHistogramBins(usize),
}

/// Builder for [`ProfilerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfilerConfigBuilder {
    output_dir: Option<PathBuf>,
    sample_limit: Option<usize>,
    outlier_sensitivity: Option<usize>,
    top_n: Option<usize>,
    histogram_bins: Option<usize>,
    scale_features: Option<bool>,
    report_kind: Option<ReportKind>,
}

impl ProfilerConfigBuilder {
    /// Set the root output directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the classification sampling cap.
    pub fn sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = Some(limit);
        self
    }

    /// Set the outlier detector sensitivity.
    pub fn outlier_sensitivity(mut self, sensitivity: usize) -> Self {
        self.outlier_sensitivity = Some(sensitivity);
        self
    }

    /// Set the top-N category count for count plots and value-count tables.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the histogram bin count.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Enable or disable the destructive encode/scale step.
    pub fn scale_features(mut self, scale: bool) -> Self {
        self.scale_features = Some(scale);
        self
    }

    /// Select which document flow(s) to produce.
    pub fn report_kind(mut self, kind: ReportKind) -> Self {
        self.report_kind = Some(kind);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfilerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfilerConfig, ConfigValidationError> {
        let config = ProfilerConfig {
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from("output")),
            sample_limit: self.sample_limit.unwrap_or(1000),
            outlier_sensitivity: self.outlier_sensitivity.unwrap_or(0),
            top_n: self.top_n.unwrap_or(10),
            histogram_bins: self.histogram_bins.unwrap_or(10),
            scale_features: self.scale_features.unwrap_or(true),
            report_kind: self.report_kind.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
