//! End-to-end profiling pipeline.
//!
//! One `run` call owns the whole sequence: classify once, profile quality,
//! produce the configured document flow(s), and finally run the destructive
//! encode/scale step. Every read-only consumer sees the frame before the
//! transform mutates it.

use crate::classifier::{ClassificationStrategy, ColumnTypeClassifier};
use crate::config::ProfilerConfig;
use crate::error::{ProfilingError, Result};
use crate::ingest::read_file_to_dataframe;
use crate::quality::{DataQualityProfiler, OutlierDetector};
use crate::reporting::{build_summary_report, build_visual_report};
use crate::session::OutputSession;
use crate::transform::{encode_and_scale, write_scaled_csv};
use crate::types::ProfileOutcome;
use crate::viz::VisualizationGenerator;
use polars::prelude::*;
use static_assertions::assert_impl_all;
use std::path::Path;
use tracing::info;

/// Orchestrates classification, quality profiling, reporting, and the final
/// encode/scale transform.
pub struct ProfilePipeline {
    config: ProfilerConfig,
    strategy: Box<dyn ClassificationStrategy + Send>,
    profiler: DataQualityProfiler,
}

impl std::fmt::Debug for ProfilePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilePipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

assert_impl_all!(ProfilePipeline: Send);

impl ProfilePipeline {
    /// Pipeline with the default classifier and detector.
    pub fn new(config: ProfilerConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> ProfilePipelineBuilder {
        ProfilePipelineBuilder::default()
    }

    /// Load a dataset file and profile it.
    pub fn profile_file(&self, path: &Path) -> Result<ProfileOutcome> {
        info!("Profiling {}", path.display());
        let mut df = read_file_to_dataframe(path)?;
        self.run(&mut df, path)
    }

    /// Profile an already-loaded frame.
    ///
    /// The frame is mutated: date-like columns are coerced during
    /// classification, and when the summary flow runs with scaling enabled
    /// the encode/scale step rewrites it at the end.
    pub fn run(&self, df: &mut DataFrame, input_path: &Path) -> Result<ProfileOutcome> {
        let shape = df.shape();
        info!("Loaded dataset with shape {:?}", shape);

        // One classification pass feeds both flows
        let classification = self.strategy.classify(df)?;
        let quality = self.profiler.quality_report(df, &classification);

        let session = OutputSession::new(&self.config.output_dir);
        let generator =
            VisualizationGenerator::new(&session, self.config.top_n, self.config.histogram_bins);

        let mut artifacts = Vec::new();
        let mut visual_report = None;
        if self.config.report_kind.includes_visual() {
            let (path, charts) = build_visual_report(
                df,
                &classification,
                &generator,
                &self.config.output_dir,
                input_path,
            )?;
            artifacts = charts.into_iter().map(|chart| chart.path).collect();
            visual_report = Some(path);
        }

        let mut summary_report = None;
        if self.config.report_kind.includes_summary() {
            summary_report = Some(build_summary_report(
                df,
                &classification,
                &quality,
                &self.profiler,
                self.config.top_n,
                &self.config.output_dir,
                input_path,
            )?);
        }

        // The destructive transform runs strictly after every read
        let mut scaled_output = None;
        if self.config.report_kind.includes_summary() && self.config.scale_features {
            encode_and_scale(df, &classification)?;
            scaled_output = Some(write_scaled_csv(df, &self.config.output_dir, input_path)?);
        }

        Ok(ProfileOutcome {
            input_file: input_path.display().to_string(),
            shape,
            classification,
            quality,
            artifacts,
            visual_report,
            summary_report,
            scaled_output,
        })
    }
}

/// Builder for [`ProfilePipeline`] with overridable strategy seams.
#[derive(Default)]
pub struct ProfilePipelineBuilder {
    config: Option<ProfilerConfig>,
    strategy: Option<Box<dyn ClassificationStrategy + Send>>,
    detector: Option<Box<dyn OutlierDetector>>,
}

impl ProfilePipelineBuilder {
    pub fn config(mut self, config: ProfilerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the column classifier.
    pub fn strategy(mut self, strategy: Box<dyn ClassificationStrategy + Send>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Replace the outlier detector.
    pub fn detector(mut self, detector: Box<dyn OutlierDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn build(self) -> Result<ProfilePipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| ProfilingError::InvalidConfig(e.to_string()))?;

        let strategy = self
            .strategy
            .unwrap_or_else(|| Box::new(ColumnTypeClassifier::new(config.sample_limit)));
        let profiler = match self.detector {
            Some(detector) => {
                DataQualityProfiler::with_detector(detector, config.outlier_sensitivity)
            }
            None => DataQualityProfiler::new(config.outlier_sensitivity),
        };

        Ok(ProfilePipeline {
            config,
            strategy,
            profiler,
        })
    }
}
