//! User clustering scatter

use super::{empty_chart, FONT};
use crate::error::{AnalysisError, AnalysisResult};
use mystia_common::Post;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const CLUSTER_CHART_SIZE: (u32, u32) = (2700, 1800);
const POINT_SIZE: i32 = 12;

const CLUSTER_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

fn cluster_color(cluster: usize) -> RGBColor {
    CLUSTER_COLORS[cluster % CLUSTER_COLORS.len()]
}

fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((max - min) * 0.05).max(0.1);
    (min - pad)..(max + pad)
}

/// Scatter of `log_interaction` against `depend_index`, one colour per cluster
pub fn draw_clusters(path: &Path, posts: &[Post], cluster_count: usize) -> AnalysisResult<()> {
    let points: Vec<(f64, f64, usize)> = posts
        .iter()
        .filter_map(|p| Some((p.log_interaction, p.depend_index?, p.cluster?)))
        .collect();
    if points.is_empty() {
        return Err(empty_chart("user clustering"));
    }

    let root = BitMapBackend::new(path, CLUSTER_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(AnalysisError::chart)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("User Clustering", (FONT, 70))
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(160)
        .build_cartesian_2d(
            axis_range(points.iter().map(|p| p.0)),
            axis_range(points.iter().map(|p| p.1)),
        )
        .map_err(AnalysisError::chart)?;

    chart
        .configure_mesh()
        .x_desc("log10(interaction + 1)")
        .y_desc("Mystic dependence index")
        .label_style((FONT, 40))
        .axis_desc_style((FONT, 45))
        .draw()
        .map_err(AnalysisError::chart)?;

    for cluster in 0..cluster_count {
        let color = cluster_color(cluster);
        chart
            .draw_series(
                points
                    .iter()
                    .filter(|p| p.2 == cluster)
                    .map(|p| Circle::new((p.0, p.1), POINT_SIZE, color.mix(0.7).filled())),
            )
            .map_err(AnalysisError::chart)?
            .label(format!("Cluster {}", cluster))
            .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, color.filled()));
    }

    chart
        .configure_series_labels()
        .label_font((FONT, 40))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(AnalysisError::chart)?;

    root.present().map_err(AnalysisError::chart)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_range_padding() {
        let range = axis_range([1.0, 3.0].into_iter());
        assert!(range.start < 1.0 && range.end > 3.0);

        let range = axis_range([2.0, 2.0].into_iter());
        assert!((range.start - 1.9).abs() < 1e-12);
        assert!((range.end - 2.1).abs() < 1e-12);

        assert_eq!(axis_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn test_cluster_colors_wrap() {
        let first = cluster_color(0);
        let wrapped = cluster_color(CLUSTER_COLORS.len());
        assert_eq!((first.0, first.1, first.2), (wrapped.0, wrapped.1, wrapped.2));
    }

    #[test]
    fn test_unclustered_posts_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![Post::new("", 1, 1, 1)];
        let err = draw_clusters(&dir.path().join("c.png"), &posts, 3).unwrap_err();
        assert!(matches!(err, AnalysisError::Chart(_)));
    }
}
