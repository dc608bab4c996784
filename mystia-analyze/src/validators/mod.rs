//! Data-quality validators
//!
//! Validators assess the loaded corpus and report a `ValidationResult`
//! alongside the analysis; they never stop the pipeline.

pub mod dataset_quality;

pub use dataset_quality::DatasetQualityScorer;
