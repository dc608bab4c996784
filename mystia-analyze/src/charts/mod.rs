//! PNG chart rendering
//!
//! Four charts are written to the output directory:
//! - `scenario_distribution.png`: pie of scenario shares
//! - `scenario_sentiment.png`: mean sentiment per scenario (horizontal bars)
//! - `scenario_dependence.png`: mean dependence per scenario (vertical bars)
//! - `user_clustering.png`: interaction vs dependence, coloured by cluster
//!
//! Labels use the English scenario names. Rendering text needs a system
//! font; backend failures surface as `AnalysisError::Chart`.

pub mod clusters;
pub mod scenario;

use crate::aggregator::ScenarioReport;
use crate::error::{AnalysisError, AnalysisResult};
use mystia_common::{Post, Scenario};
use plotters::style::RGBColor;
use serde::Serialize;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DISTRIBUTION_CHART: &str = "scenario_distribution.png";
pub const SENTIMENT_CHART: &str = "scenario_sentiment.png";
pub const DEPENDENCE_CHART: &str = "scenario_dependence.png";
pub const CLUSTERING_CHART: &str = "user_clustering.png";

pub(crate) const FONT: &str = "sans-serif";

/// Paths of the rendered charts
#[derive(Debug, Clone, Serialize)]
pub struct ChartFiles {
    pub distribution: PathBuf,
    pub sentiment: PathBuf,
    pub dependence: PathBuf,
    pub clustering: PathBuf,
}

/// Render every chart into `output_dir` (created if missing)
pub fn render_all(
    output_dir: &Path,
    report: &ScenarioReport,
    posts: &[Post],
    cluster_count: usize,
) -> AnalysisResult<ChartFiles> {
    std::fs::create_dir_all(output_dir)?;

    let files = ChartFiles {
        distribution: output_dir.join(DISTRIBUTION_CHART),
        sentiment: output_dir.join(SENTIMENT_CHART),
        dependence: output_dir.join(DEPENDENCE_CHART),
        clustering: output_dir.join(CLUSTERING_CHART),
    };

    scenario::draw_distribution(&files.distribution, report)?;
    scenario::draw_sentiment(&files.sentiment, report)?;
    scenario::draw_dependence(&files.dependence, report)?;
    clusters::draw_clusters(&files.clustering, posts, cluster_count)?;

    info!("Charts written to {}", output_dir.display());
    Ok(files)
}

/// Fixed colour per scenario, shared by every scenario chart
pub(crate) fn scenario_color(scenario: Scenario) -> RGBColor {
    match scenario {
        Scenario::Emotional => RGBColor(251, 128, 114),
        Scenario::Academic => RGBColor(128, 177, 211),
        Scenario::Career => RGBColor(253, 180, 98),
        Scenario::Daily => RGBColor(179, 222, 105),
        Scenario::Other => RGBColor(190, 186, 218),
    }
}

/// Value range covering every value and zero, with 10% headroom
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = max - min;
    if span <= 0.0 {
        return -1.0..1.0;
    }
    let pad = span * 0.1;
    (min - pad)..(max + pad)
}

/// Category label for a slot position on an f64 axis
///
/// Slot `i` is centred on `i as f64`; positions between slots get no label.
pub(crate) fn slot_label(position: f64, names: &[&str]) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names
        .get(rounded as usize)
        .map(|name| name.to_string())
        .unwrap_or_default()
}

pub(crate) fn slot_range(count: usize) -> Range<f64> {
    -0.5..(count as f64 - 0.5)
}

pub(crate) fn empty_chart(what: &str) -> AnalysisError {
    AnalysisError::Chart(format!("nothing to plot for {}", what))
}
