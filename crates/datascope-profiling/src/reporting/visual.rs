//! Visual report flow: charts for every classified column, embedded in one
//! document.

use super::REPORT_TITLE;
use crate::error::{ProfilingError, Result};
use crate::session::ensure_directory;
use crate::types::ColumnClassification;
use crate::utils::file_stem;
use crate::viz::{ChartArtifact, VisualizationGenerator};
use datascope_report::Document;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render every chart for the classified columns and assemble them into the
/// graphs document, saved as `eda_report_graphs_{stem}.html` under the
/// output root.
///
/// Categorical count plots come first, then the numerical charts ending with
/// the correlation heatmap. Returns the document path and the individual
/// chart artifacts in embedding order.
pub fn build_visual_report(
    df: &DataFrame,
    classification: &ColumnClassification,
    generator: &VisualizationGenerator<'_>,
    output_root: &Path,
    input_path: &Path,
) -> Result<(PathBuf, Vec<ChartArtifact>)> {
    let mut artifacts = generator.categorical_charts(df, classification);
    artifacts.extend(generator.numerical_charts(df, classification));

    let mut document = Document::new(REPORT_TITLE);
    for artifact in &artifacts {
        document.add_image(&artifact.path);
    }

    ensure_directory(output_root)?;
    let path = output_root.join(format!("eda_report_graphs_{}.html", file_stem(input_path)));
    document
        .save_to_file(&path)
        .map_err(|e| ProfilingError::ReportGenerationFailed(e.to_string()))?;

    info!(
        "Saved visual report with {} charts to {}",
        artifacts.len(),
        path.display()
    );
    Ok((path, artifacts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::OutputSession;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_visual_report_embeds_all_charts() {
        let root = tempfile::tempdir().unwrap();
        let df = df![
            "age" => [30.0f64, 41.0, 25.0, 19.0],
            "fare" => [7.25f64, 71.28, 7.92, 53.1],
            "city" => ["Cairo", "Lagos", "Cairo", "Accra"],
        ]
        .unwrap();
        let classification = ColumnClassification {
            numerical: vec!["age".to_string(), "fare".to_string()],
            categorical: vec!["city".to_string()],
            ..ColumnClassification::default()
        };

        let session = OutputSession::new(root.path());
        let generator = VisualizationGenerator::new(&session, 10, 10);
        let (path, artifacts) =
            build_visual_report(&df, &classification, &generator, root.path(), Path::new("train.csv"))
                .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "eda_report_graphs_train.html"
        );
        assert!(path.is_file());

        // 1 count plot + 3 charts per numerical column + heatmap
        assert_eq!(artifacts.len(), 8);
        // Categorical charts lead
        assert!(artifacts[0].title.starts_with("Count Plot"));
        assert_eq!(artifacts.last().unwrap().title, "Correlation Matrix");

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains(REPORT_TITLE));
        assert!(html.contains("box_plot_of_age.html"));
    }

    #[test]
    fn test_visual_report_with_no_numeric_columns() {
        let root = tempfile::tempdir().unwrap();
        let df = df!["city" => ["a", "b", "a"]].unwrap();
        let classification = ColumnClassification {
            categorical: vec!["city".to_string()],
            ..ColumnClassification::default()
        };

        let session = OutputSession::new(root.path());
        let generator = VisualizationGenerator::new(&session, 10, 10);
        let (path, artifacts) =
            build_visual_report(&df, &classification, &generator, root.path(), Path::new("c.csv"))
                .unwrap();

        assert!(path.is_file());
        assert_eq!(artifacts.len(), 1);
    }
}
