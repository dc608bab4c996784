//! Corpus-wide feature standardization
//!
//! Two passes over a feature column: `Standardizer::fit` gathers population
//! statistics once over every value, `Standardizer::transform` applies
//! `(x - mean) / std` afterwards. A zero-variance column scales to 0.0
//! everywhere instead of dividing by zero.

use serde::Serialize;
use tracing::warn;

/// Population statistics of one feature column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by n, not n - 1)
    pub std_dev: f64,
}

impl FeatureStats {
    /// First pass: mean, then mean squared deviation
    pub fn gather(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        Self {
            count: values.len(),
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// True when the column carries no spread
    ///
    /// Rounding in the mean can leave a residual deviation on constant
    /// columns, so anything below a few ulps of the mean counts as zero.
    /// The bound is relative: a column is only treated as constant when its
    /// spread is under about 2e-15 of its mean, i.e. ten ulps at that
    /// magnitude. A counter column with a mean of 1e12 registers any spread
    /// above 0.0023.
    pub fn is_zero_variance(&self) -> bool {
        self.std_dev <= 10.0 * f64::EPSILON * self.mean.abs().max(1.0)
    }

    /// Scale a single value with these statistics
    pub fn scale(&self, x: f64) -> f64 {
        if self.is_zero_variance() {
            0.0
        } else {
            (x - self.mean) / self.std_dev
        }
    }
}

/// Fitted standardizer for one named feature
#[derive(Debug, Clone, Serialize)]
pub struct Standardizer {
    feature: String,
    stats: FeatureStats,
}

impl Standardizer {
    /// Gather statistics over the whole column
    pub fn fit(feature: impl Into<String>, values: &[f64]) -> Self {
        let feature = feature.into();
        let stats = FeatureStats::gather(values);
        if stats.count > 0 && stats.is_zero_variance() {
            warn!(
                feature = %feature,
                mean = stats.mean,
                "Feature has zero variance; standardized values fall back to 0"
            );
        }
        Self { feature, stats }
    }

    /// Apply the fitted statistics to a column
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&x| self.stats.scale(x)).collect()
    }

    /// Fit and transform in one call, keeping the two passes distinct
    pub fn fit_transform(feature: impl Into<String>, values: &[f64]) -> (Self, Vec<f64>) {
        let standardizer = Self::fit(feature, values);
        let scaled = standardizer.transform(values);
        (standardizer, scaled)
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn stats(&self) -> &FeatureStats {
        &self.stats
    }

    pub fn is_zero_variance(&self) -> bool {
        self.stats.count > 0 && self.stats.is_zero_variance()
    }
}
