//! Analysis report
//!
//! Collects every reporting artifact of a run into one serializable
//! `AnalysisReport`, prints a console summary through `tracing`, and writes
//! the report as pretty-printed JSON.

use crate::aggregator::ScenarioReport;
use crate::charts::ChartFiles;
use crate::clustering::ClusteringOutcome;
use crate::dependence::DependenceOutcome;
use crate::error::AnalysisResult;
use crate::loader::InputFormat;
use crate::tagging::TaggingDiagnostics;
use crate::types::{DataQualityWarning, ValidationResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything a run produced, minus the per-post rows
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub input: PathBuf,
    pub input_format: InputFormat,
    pub post_count: usize,
    pub scenarios: ScenarioReport,
    pub tagging: TaggingDiagnostics,
    pub dataset_quality: ValidationResult,
    pub dependence: DependenceOutcome,
    pub clustering: ClusteringOutcome,
    /// Every data-quality warning raised during the run, in stage order
    pub warnings: Vec<DataQualityWarning>,
    pub charts: Option<ChartFiles>,
}

impl AnalysisReport {
    /// Write the report as pretty JSON, creating parent directories
    pub fn write_json(&self, path: &Path) -> AnalysisResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!("Report written to {}", path.display());
        Ok(())
    }

    /// Console summary of the run
    pub fn log_summary(&self) {
        info!("=== Scenario distribution ({} posts) ===", self.post_count);
        for share in &self.scenarios.distribution {
            info!(
                "  {:<6} {:>6} posts ({:.1}%)",
                share.scenario.label(),
                share.count,
                share.proportion * 100.0
            );
        }

        info!("=== Mean sentiment by scenario ===");
        for row in &self.scenarios.sentiment_means {
            info!(
                "  {:<6} {:>8.3} ({:?}, n={})",
                row.scenario.label(),
                row.mean,
                row.tone,
                row.count
            );
        }

        info!("=== Mystic dependence ranking ===");
        for row in &self.scenarios.dependence_ranking {
            info!(
                "  #{} {:<6} {:>8.3} ({:?}, n={})",
                row.rank,
                row.scenario.label(),
                row.mean,
                row.level,
                row.count
            );
        }

        info!(
            "=== User clusters (k={}, inertia {:.3}, {} iterations) ===",
            self.clustering.config.k, self.clustering.inertia, self.clustering.iterations
        );
        for profile in &self.clustering.profiles {
            info!(
                "  Cluster {}: {} posts ({:.1}%), log interaction {:.2}, dependence {:.3}",
                profile.cluster,
                profile.size,
                profile.share * 100.0,
                profile.log_interaction.mean,
                profile.depend_index.mean
            );
        }

        info!(
            "Dataset quality: {:?} (score {:.2})",
            self.dataset_quality.status, self.dataset_quality.score
        );

        if self.warnings.is_empty() {
            info!("No data-quality warnings");
        } else {
            warn!("{} data-quality warning(s):", self.warnings.len());
            for warning in &self.warnings {
                warn!("  {}", warning);
            }
        }
    }
}
