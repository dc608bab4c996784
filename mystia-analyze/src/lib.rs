//! mystia-analyze library interface
//!
//! Scores social-media posts for reliance on mystic guidance:
//! loader → scenario tagger → sentiment scorer → dependence index →
//! {aggregator, clusterer} → charts and report.

pub mod aggregator;
pub mod charts;
pub mod clustering;
pub mod config;
pub mod dependence;
pub mod error;
pub mod extractors;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod tagging;
pub mod types;
pub mod validators;

pub use crate::config::{AnalysisSettings, CliOverrides};
pub use crate::error::{AnalysisError, AnalysisResult};
pub use crate::pipeline::{Pipeline, PipelineOutput};
pub use crate::report::AnalysisReport;
