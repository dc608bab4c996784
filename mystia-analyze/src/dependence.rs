//! Mystic Dependence Index Calculator
//!
//! Corpus-level stage. Requires `sentiment_score` to be set on every post.
//!
//! # Scoring Algorithm
//! 1. `mystic_density` per post (mystic keyword occurrences)
//! 2. `interaction_score` per post: reposts + 2 × comments + 0.5 × attitudes
//! 3. Standardize mystic density, interaction and sentiment over the whole
//!    corpus (population statistics, computed once; zero variance → 0)
//! 4. Composite:
//!    - Mystic density (weight: 0.4)
//!    - Interaction (weight: 0.4)
//!    - Sentiment (weight: -0.2, negative mood raises dependence)

use crate::extractors::MysticDensity;
use crate::types::DataQualityWarning;
use mystia_common::models::interaction_score;
use mystia_common::{Post, Standardizer};
use serde::Serialize;
use tracing::debug;

pub const MYSTIC_WEIGHT: f64 = 0.4;
pub const INTERACTION_WEIGHT: f64 = 0.4;
pub const SENTIMENT_WEIGHT: f64 = -0.2;

/// Weighted composite of the three standardized features
pub fn composite_index(scaled_mystic: f64, scaled_interaction: f64, scaled_sentiment: f64) -> f64 {
    MYSTIC_WEIGHT * scaled_mystic
        + INTERACTION_WEIGHT * scaled_interaction
        + SENTIMENT_WEIGHT * scaled_sentiment
}

/// Fitted statistics and findings of one dependence run
#[derive(Debug, Clone, Serialize)]
pub struct DependenceOutcome {
    pub mystic_density: Standardizer,
    pub interaction_score: Standardizer,
    pub sentiment_score: Standardizer,
    pub warnings: Vec<DataQualityWarning>,
}

/// Computes `depend_index` for a whole corpus
#[derive(Debug, Clone, Default)]
pub struct DependenceCalculator {
    mystic: MysticDensity,
}

impl DependenceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotate density, interaction and dependence on every post
    pub fn compute(&self, posts: &mut [Post]) -> DependenceOutcome {
        for post in posts.iter_mut() {
            post.mystic_density = self.mystic.density(&post.text);
            post.interaction_score = interaction_score(
                post.reposts_count,
                post.comments_count,
                post.attitudes_count,
            );
        }

        let mystic: Vec<f64> = posts.iter().map(|p| p.mystic_density as f64).collect();
        let interaction: Vec<f64> = posts.iter().map(|p| p.interaction_score).collect();
        let sentiment: Vec<f64> = posts.iter().map(|p| p.sentiment_score as f64).collect();

        // Pass 1: corpus statistics
        let mystic_scaler = Standardizer::fit("mystic_density", &mystic);
        let interaction_scaler = Standardizer::fit("interaction_score", &interaction);
        let sentiment_scaler = Standardizer::fit("sentiment_score", &sentiment);

        // Pass 2: apply
        let scaled_mystic = mystic_scaler.transform(&mystic);
        let scaled_interaction = interaction_scaler.transform(&interaction);
        let scaled_sentiment = sentiment_scaler.transform(&sentiment);

        for (i, post) in posts.iter_mut().enumerate() {
            post.depend_index = Some(composite_index(
                scaled_mystic[i],
                scaled_interaction[i],
                scaled_sentiment[i],
            ));
        }

        let warnings = [&mystic_scaler, &interaction_scaler, &sentiment_scaler]
            .into_iter()
            .filter(|scaler| scaler.is_zero_variance())
            .map(|scaler| DataQualityWarning::ZeroVariance {
                feature: scaler.feature().to_string(),
            })
            .collect();

        debug!(
            posts = posts.len(),
            mystic_mean = mystic_scaler.stats().mean,
            interaction_mean = interaction_scaler.stats().mean,
            sentiment_mean = sentiment_scaler.stats().mean,
            "Dependence index computed"
        );

        DependenceOutcome {
            mystic_density: mystic_scaler,
            interaction_score: interaction_scaler,
            sentiment_score: sentiment_scaler,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::SentimentScorer;

    fn annotated(specs: &[(&str, u64, u64, u64)]) -> Vec<Post> {
        let mut posts: Vec<Post> = specs
            .iter()
            .map(|(text, r, c, a)| Post::new(*text, *r, *c, *a))
            .collect();
        SentimentScorer::new().annotate(&mut posts);
        posts
    }

    #[test]
    fn test_weights() {
        assert_eq!(composite_index(1.0, 0.0, 0.0), 0.4);
        assert_eq!(composite_index(0.0, 1.0, 0.0), 0.4);
        assert_eq!(composite_index(0.0, 0.0, 1.0), -0.2);
        assert_eq!(composite_index(0.0, 0.0, -1.0), 0.2);
    }

    #[test]
    fn test_interaction_score_annotated() {
        let mut posts = annotated(&[("", 10, 5, 4), ("", 0, 0, 0)]);
        DependenceCalculator::new().compute(&mut posts);
        assert_eq!(posts[0].interaction_score, 22.0);
        assert_eq!(posts[1].interaction_score, 0.0);
    }

    #[test]
    fn test_identical_interaction_scales_to_zero() {
        let mut posts = annotated(&[("星座", 1, 1, 2), ("开心", 1, 1, 2), ("焦虑 塔罗", 1, 1, 2)]);
        let outcome = DependenceCalculator::new().compute(&mut posts);

        assert!(outcome.interaction_score.is_zero_variance());
        let scaled = outcome
            .interaction_score
            .transform(&posts.iter().map(|p| p.interaction_score).collect::<Vec<_>>());
        assert!(scaled.iter().all(|v| *v == 0.0));
        assert!(outcome.warnings.contains(&DataQualityWarning::ZeroVariance {
            feature: "interaction_score".to_string()
        }));
    }

    #[test]
    fn test_known_values() {
        // mystic [1, 0], interaction [0, 0], sentiment [0, 0]
        let mut posts = annotated(&[("塔罗", 0, 0, 0), ("", 0, 0, 0)]);
        DependenceCalculator::new().compute(&mut posts);
        // scaled mystic [1, -1], others zero-variance
        assert!((posts[0].depend_index.unwrap() - 0.4).abs() < 1e-12);
        assert!((posts[1].depend_index.unwrap() + 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_negative_sentiment_raises_dependence() {
        let mut posts = annotated(&[("焦虑", 0, 0, 0), ("开心", 0, 0, 0)]);
        DependenceCalculator::new().compute(&mut posts);
        assert!(posts[0].depend_index.unwrap() > posts[1].depend_index.unwrap());
    }

    #[test]
    fn test_ranking_invariant_to_affine_counter_rescaling() {
        let base = [("塔罗", 3, 1, 10), ("开心", 50, 2, 0), ("焦虑", 0, 9, 4), ("", 7, 7, 7)];
        let scaled: Vec<(&str, u64, u64, u64)> = base
            .iter()
            .map(|(t, r, c, a)| (*t, r * 10 + 3, c * 10 + 3, a * 10 + 3))
            .collect();

        let mut a = annotated(&base);
        let mut b = annotated(&scaled);
        DependenceCalculator::new().compute(&mut a);
        DependenceCalculator::new().compute(&mut b);

        // Interaction is linear in the counters, so its z-score is unchanged
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x.depend_index.unwrap() - y.depend_index.unwrap()).abs() < 1e-9);
        }

        let order = |posts: &[Post]| {
            let mut idx: Vec<usize> = (0..posts.len()).collect();
            idx.sort_by(|&i, &j| {
                posts[j]
                    .depend_index
                    .unwrap()
                    .total_cmp(&posts[i].depend_index.unwrap())
            });
            idx
        };
        assert_eq!(order(&a), order(&b));
    }

    #[test]
    fn test_standardized_index_has_zero_mean() {
        let mut posts = annotated(&[("塔罗 星座", 3, 1, 10), ("开心", 50, 2, 0), ("焦虑", 0, 9, 4)]);
        DependenceCalculator::new().compute(&mut posts);
        let mean: f64 = posts.iter().map(|p| p.depend_index.unwrap()).sum::<f64>() / 3.0;
        assert!(mean.abs() < 1e-12);
    }
}
