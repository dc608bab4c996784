//! Core Types and Trait Definitions for mystia-analyze
//!
//! Defines the seams of the scoring pipeline:
//! - **SceneMatcher:** one strategy in the scenario tagging chain
//! - **TextFeature:** a pure per-post text score (sentiment, mystic density)
//! - **Validation:** a data-quality assessment producing a `ValidationResult`
//!
//! Data-quality findings travel as `DataQualityWarning` values next to the
//! stage output that produced them, so they can be asserted on directly.

use mystia_common::Scenario;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Scenario tagging
// ============================================================================

/// Which link of the tagging chain produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchStrategy {
    /// One scenario clearly ahead on keyword hits
    Keyword,
    /// Top two scenarios within the tie margin
    MultiScene,
    /// Single-character fallback
    Loose,
    /// Nothing matched; tagged Other
    Fallback,
}

/// Result of a successful match attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneMatch {
    /// Single best scenario, used for aggregation
    pub primary: Scenario,
    /// Runner-up retained for multi-scenario matches
    pub secondary: Option<Scenario>,
    /// Keyword hits of the primary scenario
    pub hits: usize,
    pub strategy: MatchStrategy,
}

/// One strategy in the ordered tagging chain
///
/// Returning `None` passes the text on to the next strategy.
///
/// # Example
/// ```rust,ignore
/// use mystia_analyze::types::{SceneMatcher, SceneMatch};
///
/// struct AlwaysDaily;
///
/// impl SceneMatcher for AlwaysDaily {
///     fn name(&self) -> &'static str { "AlwaysDaily" }
///
///     fn attempt(&self, _text: &str) -> Option<SceneMatch> {
///         Some(SceneMatch {
///             primary: Scenario::Daily,
///             secondary: None,
///             hits: 0,
///             strategy: MatchStrategy::Loose,
///         })
///     }
/// }
/// ```
pub trait SceneMatcher {
    /// Matcher name for diagnostics
    fn name(&self) -> &'static str;

    /// Try to classify cleaned text
    fn attempt(&self, text: &str) -> Option<SceneMatch>;
}

// ============================================================================
// Text features
// ============================================================================

/// Pure function of cleaned text to a signed integer score
///
/// Implementations must be deterministic: scoring the same text twice gives
/// the same value.
pub trait TextFeature {
    /// Feature name for diagnostics and reports
    fn name(&self) -> &'static str;

    /// Score one text
    fn score(&self, text: &str) -> i64;
}

// ============================================================================
// Validation
// ============================================================================

/// Data-quality validation
pub trait Validation {
    /// Input type for validation
    type Input: ?Sized;

    /// Validator name for provenance tracking
    fn name(&self) -> &'static str;

    /// Validate input and produce a quality assessment
    fn validate(&self, input: &Self::Input) -> ValidationResult;
}

/// Validation result
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    /// Quality score (0.0-1.0)
    pub score: f64,
    /// Human-readable findings
    pub issues: Vec<String>,
    /// Detailed validation report (JSON)
    pub report: serde_json::Value,
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationStatus {
    /// All checks passed
    Pass,
    /// Minor issues detected (non-blocking)
    Warning,
    /// Serious issues detected (results only indicative)
    Fail,
}

// ============================================================================
// Data-quality warnings
// ============================================================================

/// Non-fatal finding surfaced alongside a stage result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// Too many posts fell through every matcher
    HighOtherRatio {
        ratio: f64,
        threshold: f64,
        other_count: usize,
        total: usize,
    },
    /// A standardized feature had no spread; scaled values are all 0
    ZeroVariance { feature: String },
    /// Counter values that were not non-negative integers and became 0
    CoercedCounters { count: usize },
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityWarning::HighOtherRatio {
                ratio,
                threshold,
                other_count,
                total,
            } => write!(
                f,
                "Other ratio {:.1}% ({}/{}) exceeds {:.1}%; keyword lists need expansion",
                ratio * 100.0,
                other_count,
                total,
                threshold * 100.0
            ),
            DataQualityWarning::ZeroVariance { feature } => {
                write!(f, "Feature '{}' has zero variance; scaled to 0", feature)
            }
            DataQualityWarning::CoercedCounters { count } => {
                write!(f, "{} counter value(s) were not valid counts and became 0", count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_status_equality() {
        assert_eq!(ValidationStatus::Pass, ValidationStatus::Pass);
        assert_ne!(ValidationStatus::Pass, ValidationStatus::Warning);
    }

    #[test]
    fn test_warning_display() {
        let warning = DataQualityWarning::HighOtherRatio {
            ratio: 0.25,
            threshold: 0.20,
            other_count: 25,
            total: 100,
        };
        assert_eq!(
            warning.to_string(),
            "Other ratio 25.0% (25/100) exceeds 20.0%; keyword lists need expansion"
        );
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let warning = DataQualityWarning::ZeroVariance {
            feature: "interaction_score".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "zero_variance");
        assert_eq!(json["feature"], "interaction_score");
    }
}
