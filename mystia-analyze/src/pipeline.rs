//! Pipeline Orchestrator
//!
//! Runs the complete analysis over one post file.
//!
//! # Phases
//! - **Phase 1**: Load (read, normalize and clean records)
//! - **Phase 2**: Per-post annotation (scenario tags, sentiment)
//! - **Phase 3**: Corpus-level scoring (dependence index, standardized once
//!   over the whole corpus)
//! - **Phase 4**: Reporting (aggregation, clustering, dataset quality)
//! - **Phase 5**: Output (charts, JSON report)
//!
//! # Error Handling
//! Input, configuration and chart failures abort the run. Data-quality
//! findings never do; they are collected into `AnalysisReport::warnings`.
//!
//! # Example
//! ```rust,ignore
//! let pipeline = Pipeline::new(AnalysisSettings::new("posts.json", "out"));
//! let output = pipeline.run()?;
//! println!("{} posts", output.posts.len());
//! ```

use crate::aggregator::aggregate;
use crate::charts;
use crate::clustering::{KMeansConfig, UserClusterer};
use crate::config::AnalysisSettings;
use crate::dependence::DependenceCalculator;
use crate::error::AnalysisResult;
use crate::extractors::SentimentScorer;
use crate::loader::{load_posts, LoadedCorpus};
use crate::report::AnalysisReport;
use crate::tagging::SceneTagger;
use crate::types::Validation;
use crate::validators::DatasetQualityScorer;
use chrono::Utc;
use mystia_common::Post;
use tracing::{debug, info};

/// Annotated posts plus the run report
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub posts: Vec<Post>,
    pub report: AnalysisReport,
}

/// Analysis pipeline for one run
pub struct Pipeline {
    settings: AnalysisSettings,
    tagger: SceneTagger,
    sentiment: SentimentScorer,
    dependence: DependenceCalculator,
    clusterer: UserClusterer,
    quality: DatasetQualityScorer,
}

impl Pipeline {
    pub fn new(settings: AnalysisSettings) -> Self {
        let tagger = SceneTagger::new(settings.tie_margin, settings.other_warning_ratio);
        Self {
            settings,
            tagger,
            sentiment: SentimentScorer::new(),
            dependence: DependenceCalculator::new(),
            clusterer: UserClusterer::new(KMeansConfig::default()),
            quality: DatasetQualityScorer::new(),
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Load the configured input, analyze it and write every output
    pub fn run(&self) -> AnalysisResult<PipelineOutput> {
        info!("Phase 1: loading {}", self.settings.input.display());
        let corpus = load_posts(&self.settings.input)?;

        let mut output = self.analyze(corpus)?;

        info!("Phase 5: writing output to {}", self.settings.output_dir.display());
        if self.settings.charts {
            let files = charts::render_all(
                &self.settings.output_dir,
                &output.report.scenarios,
                &output.posts,
                output.report.clustering.config.k,
            )?;
            output.report.charts = Some(files);
        } else {
            debug!("Chart rendering disabled");
        }
        output.report.write_json(&self.settings.report_path())?;

        Ok(output)
    }

    /// Analyze an already-loaded corpus without touching the filesystem
    pub fn analyze(&self, corpus: LoadedCorpus) -> AnalysisResult<PipelineOutput> {
        let LoadedCorpus {
            mut posts,
            format,
            warnings: load_warnings,
        } = corpus;
        let mut warnings = load_warnings;

        info!("Phase 2: tagging scenarios and scoring sentiment");
        let tagging = self.tagger.tag_posts(&mut posts);
        warnings.extend(tagging.warning.clone());
        self.sentiment.annotate(&mut posts);

        info!("Phase 3: computing mystic dependence index");
        let dependence = self.dependence.compute(&mut posts);
        warnings.extend(dependence.warnings.iter().cloned());

        info!("Phase 4: aggregating, clustering and validating");
        let scenarios = aggregate(&posts);
        let clustering = self.clusterer.cluster(&mut posts)?;
        warnings.extend(clustering.warnings.iter().cloned());
        let dataset_quality = self.quality.validate(&posts);

        let report = AnalysisReport {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input: self.settings.input.clone(),
            input_format: format,
            post_count: posts.len(),
            scenarios,
            tagging,
            dataset_quality,
            dependence,
            clustering,
            warnings,
            charts: None,
        };
        report.log_summary();

        Ok(PipelineOutput { posts, report })
    }
}
