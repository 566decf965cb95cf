//! Report document flows.
//!
//! Two flows share one classification pass: the visual flow renders every
//! chart into the session directory and embeds them in a graphs document,
//! and the summary flow lays out quality statistics and per-column tables.
//! Both delegate layout and persistence to `datascope-report`.

mod summary;
mod visual;

pub use summary::build_summary_report;
pub use visual::build_visual_report;

/// Title shared by both report documents.
pub(crate) const REPORT_TITLE: &str = "Exploratory Data Analysis Results";
