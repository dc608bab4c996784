//! Scenario matcher strategies
//!
//! Three links of the tagging chain, tried in order:
//! 1. `KeywordMatcher` - one scenario ahead of the rest by more than the tie margin
//! 2. `MultiSceneMatcher` - top two scenarios within the tie margin
//! 3. `LooseMatcher` - single-character fallback
//!
//! Ties on hit count resolve in `Scenario::KEYWORDED` order.

use super::lexicon::{loose_keywords, scene_keywords};
use crate::extractors::lexicon::count_hits;
use crate::types::{MatchStrategy, SceneMatch, SceneMatcher};
use mystia_common::Scenario;

/// Scenarios with at least one keyword hit, best first
pub fn ranked_scene_hits(text: &str) -> Vec<(Scenario, usize)> {
    let mut ranked: Vec<(Scenario, usize)> = Scenario::KEYWORDED
        .into_iter()
        .map(|scenario| (scenario, count_hits(text, scene_keywords(scenario))))
        .filter(|(_, hits)| *hits > 0)
        .collect();
    // Stable sort keeps declaration order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn within_margin(ranked: &[(Scenario, usize)], tie_margin: usize) -> bool {
    ranked.len() >= 2 && ranked[0].1 - ranked[1].1 <= tie_margin
}

/// Clear single-scenario keyword winner
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    tie_margin: usize,
}

impl KeywordMatcher {
    pub fn new(tie_margin: usize) -> Self {
        Self { tie_margin }
    }
}

impl SceneMatcher for KeywordMatcher {
    fn name(&self) -> &'static str {
        "KeywordMatcher"
    }

    fn attempt(&self, text: &str) -> Option<SceneMatch> {
        let ranked = ranked_scene_hits(text);
        let (primary, hits) = *ranked.first()?;
        if within_margin(&ranked, self.tie_margin) {
            return None;
        }
        Some(SceneMatch {
            primary,
            secondary: None,
            hits,
            strategy: MatchStrategy::Keyword,
        })
    }
}

/// Near-tie between the two best scenarios; keeps both
#[derive(Debug, Clone)]
pub struct MultiSceneMatcher {
    tie_margin: usize,
}

impl MultiSceneMatcher {
    pub fn new(tie_margin: usize) -> Self {
        Self { tie_margin }
    }
}

impl SceneMatcher for MultiSceneMatcher {
    fn name(&self) -> &'static str {
        "MultiSceneMatcher"
    }

    fn attempt(&self, text: &str) -> Option<SceneMatch> {
        let ranked = ranked_scene_hits(text);
        if !within_margin(&ranked, self.tie_margin) {
            return None;
        }
        Some(SceneMatch {
            primary: ranked[0].0,
            secondary: Some(ranked[1].0),
            hits: ranked[0].1,
            strategy: MatchStrategy::MultiScene,
        })
    }
}

/// First scenario whose single-character list appears in the text
#[derive(Debug, Clone, Default)]
pub struct LooseMatcher;

impl LooseMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl SceneMatcher for LooseMatcher {
    fn name(&self) -> &'static str {
        "LooseMatcher"
    }

    fn attempt(&self, text: &str) -> Option<SceneMatch> {
        Scenario::KEYWORDED.into_iter().find_map(|scenario| {
            let hits = count_hits(text, loose_keywords(scenario));
            (hits > 0).then_some(SceneMatch {
                primary: scenario,
                secondary: None,
                hits,
                strategy: MatchStrategy::Loose,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_hits_best_first() {
        let ranked = ranked_scene_hits("考研复习好累，和对象吵架了，面试");
        // Equal counts keep declaration order
        assert_eq!(
            ranked,
            vec![
                (Scenario::Emotional, 2),
                (Scenario::Academic, 2),
                (Scenario::Career, 1)
            ]
        );
    }

    #[test]
    fn test_keyword_matcher_clear_winner() {
        let matcher = KeywordMatcher::new(1);
        let m = matcher.attempt("考研 复习 论文 和对象").unwrap();
        assert_eq!(m.primary, Scenario::Academic);
        assert_eq!(m.hits, 3);
        assert_eq!(m.strategy, MatchStrategy::Keyword);
        assert!(m.secondary.is_none());
    }

    #[test]
    fn test_keyword_matcher_defers_on_near_tie() {
        let matcher = KeywordMatcher::new(1);
        assert!(matcher.attempt("考研 面试").is_none());
    }

    #[test]
    fn test_multi_scene_matcher_keeps_top_two() {
        let matcher = MultiSceneMatcher::new(1);
        let m = matcher.attempt("面试 工作 考研").unwrap();
        assert_eq!(m.primary, Scenario::Career);
        assert_eq!(m.secondary, Some(Scenario::Academic));
        assert_eq!(m.strategy, MatchStrategy::MultiScene);
    }

    #[test]
    fn test_multi_scene_matcher_ignores_single_scene() {
        assert!(MultiSceneMatcher::new(1).attempt("考研").is_none());
    }

    #[test]
    fn test_zero_margin_only_exact_ties() {
        assert!(KeywordMatcher::new(0).attempt("面试 工作 考研").is_some());
        assert!(MultiSceneMatcher::new(0).attempt("面试 考研").is_some());
    }

    #[test]
    fn test_loose_matcher_declaration_order() {
        let m = LooseMatcher::new().attempt("我爱读书").unwrap();
        assert_eq!(m.primary, Scenario::Emotional);
        assert_eq!(m.strategy, MatchStrategy::Loose);
    }

    #[test]
    fn test_loose_matcher_no_match() {
        assert!(LooseMatcher::new().attempt("哈哈哈").is_none());
    }
}
