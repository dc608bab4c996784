//! Scenario-level charts: distribution pie, sentiment and dependence bars

use super::{empty_chart, padded_range, scenario_color, slot_label, slot_range, FONT};
use crate::aggregator::ScenarioReport;
use crate::error::{AnalysisError, AnalysisResult};
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;

const DISTRIBUTION_SIZE: (u32, u32) = (3000, 3000);
const BAR_CHART_SIZE: (u32, u32) = (2400, 1500);
const BAR_HALF_WIDTH: f64 = 0.35;

/// Pie of scenario proportions; empty scenarios are left out
pub fn draw_distribution(path: &Path, report: &ScenarioReport) -> AnalysisResult<()> {
    let slices: Vec<_> = report.distribution.iter().filter(|s| s.count > 0).collect();
    if slices.is_empty() {
        return Err(empty_chart("scenario distribution"));
    }

    let sizes: Vec<f64> = slices.iter().map(|s| s.count as f64).collect();
    let colors: Vec<RGBColor> = slices.iter().map(|s| scenario_color(s.scenario)).collect();
    let labels: Vec<String> = slices
        .iter()
        .map(|s| format!("{} ({})", s.scenario.english_name(), s.count))
        .collect();

    let root = BitMapBackend::new(path, DISTRIBUTION_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(AnalysisError::chart)?;
    let area = root
        .titled("Scenario Distribution", (FONT, 90))
        .map_err(AnalysisError::chart)?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = width.min(height) as f64 * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style((FONT, 60).into_font().color(&BLACK));
    pie.percentages((FONT, 55).into_font().color(&BLACK));
    area.draw(&pie).map_err(AnalysisError::chart)?;

    root.present().map_err(AnalysisError::chart)?;
    Ok(())
}

/// Horizontal bars of mean sentiment, ascending, with a dashed zero line
pub fn draw_sentiment(path: &Path, report: &ScenarioReport) -> AnalysisResult<()> {
    let rows = &report.sentiment_means;
    if rows.is_empty() {
        return Err(empty_chart("scenario sentiment"));
    }
    let names: Vec<&str> = rows.iter().map(|r| r.scenario.english_name()).collect();
    let x_range = padded_range(rows.iter().map(|r| r.mean));
    let y_range = slot_range(rows.len());

    let root = BitMapBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(AnalysisError::chart)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Mean Sentiment by Scenario", (FONT, 70))
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(220)
        .build_cartesian_2d(x_range, y_range.clone())
        .map_err(AnalysisError::chart)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(rows.len())
        .y_label_formatter(&|y| slot_label(*y, &names))
        .x_desc("Mean sentiment score")
        .label_style((FONT, 40))
        .axis_desc_style((FONT, 45))
        .draw()
        .map_err(AnalysisError::chart)?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            let color = if row.mean >= 0.0 {
                RGBColor(102, 194, 165)
            } else {
                RGBColor(252, 141, 98)
            };
            let y = i as f64;
            Rectangle::new(
                [(0.0, y - BAR_HALF_WIDTH), (row.mean, y + BAR_HALF_WIDTH)],
                color.filled(),
            )
        }))
        .map_err(AnalysisError::chart)?;

    // Zero line, drawn as short segments
    let dash = (y_range.end - y_range.start) / 40.0;
    let dashes = (0..40).step_by(2).map(|d| {
        let from = y_range.start + d as f64 * dash;
        PathElement::new(vec![(0.0, from), (0.0, from + dash)], BLACK.stroke_width(3))
    });
    chart.draw_series(dashes).map_err(AnalysisError::chart)?;

    root.present().map_err(AnalysisError::chart)?;
    Ok(())
}

/// Vertical bars of mean dependence, descending
pub fn draw_dependence(path: &Path, report: &ScenarioReport) -> AnalysisResult<()> {
    let rows = &report.dependence_ranking;
    if rows.is_empty() {
        return Err(empty_chart("scenario dependence"));
    }
    let names: Vec<&str> = rows.iter().map(|r| r.scenario.english_name()).collect();

    let root = BitMapBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(AnalysisError::chart)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Mystic Dependence by Scenario", (FONT, 70))
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(180)
        .build_cartesian_2d(slot_range(rows.len()), padded_range(rows.iter().map(|r| r.mean)))
        .map_err(AnalysisError::chart)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|x| slot_label(*x, &names))
        .y_desc("Mean dependence index")
        .label_style((FONT, 40))
        .axis_desc_style((FONT, 45))
        .draw()
        .map_err(AnalysisError::chart)?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, row.mean)],
                scenario_color(row.scenario).filled(),
            )
        }))
        .map_err(AnalysisError::chart)?;

    root.present().map_err(AnalysisError::chart)?;
    Ok(())
}
