//! Pure chart construction: values in, `Plot` out.
//!
//! Nothing here touches the filesystem; persistence and display dispatch
//! live in the parent module.

use plotly::common::{Fill, Mode, Title};
use plotly::layout::Axis;
use plotly::{Bar, BoxPlot, HeatMap, Histogram, Layout, Plot, Scatter};

/// Grid resolution of the density curve.
const KDE_GRID_POINTS: usize = 200;

/// Derive the artifact file stem from a chart title: lowercased, with every
/// whitespace run collapsed to one underscore.
pub(crate) fn title_slug(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

pub(crate) fn box_plot_figure(title: &str, column: &str, values: Vec<f64>) -> Plot {
    let trace = BoxPlot::new(values).name(column);
    let layout = Layout::new()
        .title(Title::with_text(title))
        .y_axis(Axis::new().title(Title::with_text(column)));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

pub(crate) fn density_figure(title: &str, column: &str, values: &[f64]) -> Plot {
    let (grid, density) = kde_curve(values);
    let trace = Scatter::new(grid, density)
        .mode(Mode::Lines)
        .fill(Fill::ToZeroY)
        .name(column);
    let layout = Layout::new()
        .title(Title::with_text(title))
        .x_axis(Axis::new().title(Title::with_text(column)))
        .y_axis(Axis::new().title(Title::with_text("Density")));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

pub(crate) fn histogram_figure(title: &str, column: &str, values: Vec<f64>, bins: usize) -> Plot {
    let trace = Histogram::new(values).name(column).n_bins_x(bins);
    let layout = Layout::new()
        .title(Title::with_text(title))
        .x_axis(Axis::new().title(Title::with_text(column)))
        .y_axis(Axis::new().title(Title::with_text("Frequency")));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

pub(crate) fn count_plot_figure(
    title: &str,
    column: &str,
    categories: Vec<String>,
    counts: Vec<usize>,
) -> Plot {
    let trace = Bar::new(categories, counts).name(column);
    let layout = Layout::new()
        .title(Title::with_text(title))
        .x_axis(Axis::new().title(Title::with_text(column)))
        .y_axis(Axis::new().title(Title::with_text("Count")));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

pub(crate) fn heatmap_figure(title: &str, columns: Vec<String>, matrix: Vec<Vec<f64>>) -> Plot {
    let trace = HeatMap::new(columns.clone(), columns, matrix);
    let layout = Layout::new().title(Title::with_text(title));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Gaussian kernel density estimate over an evenly spaced grid.
///
/// Bandwidth follows Silverman's rule of thumb, clamped away from zero so a
/// constant column still yields a drawable curve.
pub(crate) fn kde_curve(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let mut bandwidth = 1.06 * std * n.powf(-0.2);
    if bandwidth <= 0.0 {
        bandwidth = 1.0;
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lo = min - 3.0 * bandwidth;
    let hi = max + 3.0 * bandwidth;
    let step = (hi - lo) / (KDE_GRID_POINTS - 1) as f64;

    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let mut grid = Vec::with_capacity(KDE_GRID_POINTS);
    let mut density = Vec::with_capacity(KDE_GRID_POINTS);
    for i in 0..KDE_GRID_POINTS {
        let x = lo + step * i as f64;
        let d = values
            .iter()
            .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
            .sum::<f64>()
            * norm;
        grid.push(x);
        density.push(d);
    }

    (grid, density)
}
