//! Chart generation for numerical and categorical columns.
//!
//! Every chart routine builds a figure and hands it to one dispatcher that
//! applies the caller's [`OutputMode`]: open interactively, return the
//! in-memory handle, or persist it into the session directory. The batch
//! helpers used by the report flows isolate failures per chart - a column
//! that cannot be drawn is logged and skipped.

mod charts;

use crate::error::{ProfilingError, Result};
use crate::session::OutputSession;
use crate::stats::{correlation_matrix, kurtosis, numeric_values, skewness};
use crate::types::ColumnClassification;
use polars::prelude::*;
use plotly::Plot;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a chart call does with the finished figure.
///
/// `Save` wins over `Handle` when both are requested upstream; see
/// [`OutputMode::from_flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Open the figure interactively and return nothing.
    #[default]
    Display,
    /// Return the in-memory figure handle without persisting it.
    Handle,
    /// Persist the figure into the session directory.
    Save,
}

impl OutputMode {
    /// Resolve the legacy flag pair: `save` takes precedence over the
    /// handle request.
    pub fn from_flags(save: bool, handle: bool) -> Self {
        if save {
            OutputMode::Save
        } else if handle {
            OutputMode::Handle
        } else {
            OutputMode::Display
        }
    }
}

/// A chart persisted into the session directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact {
    pub title: String,
    pub path: PathBuf,
}

/// Result of one chart call under a given [`OutputMode`].
pub enum ChartOutcome {
    Saved(ChartArtifact),
    Handle(Box<Plot>),
    Displayed,
}

impl std::fmt::Debug for ChartOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartOutcome::Saved(artifact) => f.debug_tuple("Saved").field(artifact).finish(),
            ChartOutcome::Handle(_) => f.debug_tuple("Handle").finish_non_exhaustive(),
            ChartOutcome::Displayed => write!(f, "Displayed"),
        }
    }
}

impl ChartOutcome {
    /// The artifact, when the chart was saved.
    pub fn artifact(self) -> Option<ChartArtifact> {
        match self {
            ChartOutcome::Saved(artifact) => Some(artifact),
            _ => None,
        }
    }
}

/// Builds charts for one profiling run against a shared output session.
pub struct VisualizationGenerator<'a> {
    session: &'a OutputSession,
    top_n: usize,
    histogram_bins: usize,
}

impl<'a> VisualizationGenerator<'a> {
    pub fn new(session: &'a OutputSession, top_n: usize, histogram_bins: usize) -> Self {
        Self {
            session,
            top_n,
            histogram_bins,
        }
    }

    /// Box plot of one numerical column.
    pub fn box_plot(&self, df: &DataFrame, column: &str, mode: OutputMode) -> Result<ChartOutcome> {
        let values = non_null_values(df, column)?;
        let title = format!("Box Plot of {column}");
        let plot = charts::box_plot_figure(&title, column, values);
        self.render(plot, &title, mode)
    }

    /// Kernel density estimate of one numerical column.
    pub fn density_plot(
        &self,
        df: &DataFrame,
        column: &str,
        mode: OutputMode,
    ) -> Result<ChartOutcome> {
        let values = non_null_values(df, column)?;
        let title = format!("Density Plot of {column}");
        let plot = charts::density_figure(&title, column, &values);
        self.render(plot, &title, mode)
    }

    /// Histogram of one numerical column, annotated with its skewness and
    /// excess kurtosis.
    pub fn histogram(
        &self,
        df: &DataFrame,
        column: &str,
        mode: OutputMode,
    ) -> Result<ChartOutcome> {
        let values = non_null_values(df, column)?;
        let title = format!(
            "Histogram of {column}\nSkewness: {:.2}, Kurtosis: {:.2}",
            skewness(&values),
            kurtosis(&values)
        );
        let plot = charts::histogram_figure(&title, column, values, self.histogram_bins);
        self.render(plot, &title, mode)
    }

    /// Bar chart of the most frequent categories of one column.
    pub fn count_plot(
        &self,
        df: &DataFrame,
        column: &str,
        mode: OutputMode,
    ) -> Result<ChartOutcome> {
        let counts = crate::quality::top_value_counts(df, column, self.top_n)?;
        if counts.is_empty() {
            return Err(ProfilingError::NoValidValues(column.to_string()));
        }

        let title = format!("Count Plot of {column} (Top {})", self.top_n);
        let (categories, frequencies) = counts
            .into_iter()
            .map(|c| (c.value, c.count))
            .unzip::<_, _, Vec<_>, Vec<_>>();
        let plot = charts::count_plot_figure(&title, column, categories, frequencies);
        self.render(plot, &title, mode)
    }

    /// Pairwise-complete correlation heatmap over the numerical columns.
    pub fn correlation_heatmap(
        &self,
        df: &DataFrame,
        columns: &[String],
        mode: OutputMode,
    ) -> Result<ChartOutcome> {
        let title = "Correlation Matrix";
        if columns.len() < 2 {
            return Err(ProfilingError::ChartGenerationFailed {
                title: title.to_string(),
                reason: "need at least two numerical columns".to_string(),
            });
        }

        let matrix = correlation_matrix(df, columns)?;
        let plot = charts::heatmap_figure(title, columns.to_vec(), matrix);
        self.render(plot, title, mode)
    }

    /// Saved charts for every numerical column: box plot, density plot, and
    /// histogram each, plus one correlation heatmap when two or more columns
    /// exist. Failures are logged and skipped.
    pub fn numerical_charts(
        &self,
        df: &DataFrame,
        classification: &ColumnClassification,
    ) -> Vec<ChartArtifact> {
        let mut artifacts = Vec::new();

        for column in &classification.numerical {
            for result in [
                self.box_plot(df, column, OutputMode::Save),
                self.density_plot(df, column, OutputMode::Save),
                self.histogram(df, column, OutputMode::Save),
            ] {
                match result {
                    Ok(outcome) => artifacts.extend(outcome.artifact()),
                    Err(e) => warn!("Skipping chart for column '{}': {}", column, e),
                }
            }
        }

        if classification.numerical.len() >= 2 {
            match self.correlation_heatmap(df, &classification.numerical, OutputMode::Save) {
                Ok(outcome) => artifacts.extend(outcome.artifact()),
                Err(e) => warn!("Skipping correlation heatmap: {}", e),
            }
        }

        artifacts
    }

    /// Saved count plots for every categorical column. Failures are logged
    /// and skipped.
    pub fn categorical_charts(
        &self,
        df: &DataFrame,
        classification: &ColumnClassification,
    ) -> Vec<ChartArtifact> {
        let mut artifacts = Vec::new();
        for column in &classification.categorical {
            match self.count_plot(df, column, OutputMode::Save) {
                Ok(outcome) => artifacts.extend(outcome.artifact()),
                Err(e) => warn!("Skipping count plot for column '{}': {}", column, e),
            }
        }
        artifacts
    }

    /// Apply the output mode to a finished figure.
    fn render(&self, plot: Plot, title: &str, mode: OutputMode) -> Result<ChartOutcome> {
        match mode {
            OutputMode::Display => {
                plot.show();
                Ok(ChartOutcome::Displayed)
            }
            OutputMode::Handle => Ok(ChartOutcome::Handle(Box::new(plot))),
            OutputMode::Save => {
                let directory = self.session.directory()?;
                let path = directory.join(format!("{}.html", charts::title_slug(title)));
                std::fs::write(&path, plot.to_html()).map_err(|e| {
                    ProfilingError::ChartGenerationFailed {
                        title: title.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                info!("Saved chart '{}' to {}", title, path.display());
                Ok(ChartOutcome::Saved(ChartArtifact {
                    title: title.to_string(),
                    path,
                }))
            }
        }
    }
}

/// Non-null numeric values of a column, or `NoValidValues`.
fn non_null_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let series = df.column(column)?.as_materialized_series();
    let values = numeric_values(series)?;
    if values.is_empty() {
        return Err(ProfilingError::NoValidValues(column.to_string()));
    }
    Ok(values)
}
