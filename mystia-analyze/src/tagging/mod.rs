//! Scenario Tagger
//!
//! Assigns each post a primary decision scenario by running an ordered
//! chain of `SceneMatcher` strategies; the first strategy that returns a
//! match wins. Text that no strategy claims, and empty text, is tagged
//! `Other`.
//!
//! # Chain
//! 1. `KeywordMatcher` - clear keyword winner
//! 2. `MultiSceneMatcher` - near-tie, top two retained
//! 3. `LooseMatcher` - single-character fallback
//!
//! # Diagnostics
//! `tag_posts` returns `TaggingDiagnostics` with per-strategy counts, the
//! multi-label scenario counts and the Other ratio. An Other ratio above the
//! configured threshold yields `DataQualityWarning::HighOtherRatio` (and a
//! `warn!` event); tagging itself never fails.

pub mod lexicon;
pub mod matchers;

pub use matchers::{KeywordMatcher, LooseMatcher, MultiSceneMatcher};

use crate::types::{DataQualityWarning, MatchStrategy, SceneMatch, SceneMatcher};
use mystia_common::{Post, Scenario};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Default Other share above which a data-quality warning is raised
pub const DEFAULT_OTHER_WARNING_RATIO: f64 = 0.20;

/// Default hit difference treated as a near-tie
pub const DEFAULT_TIE_MARGIN: usize = 1;

/// Tagging summary returned alongside the annotated posts
#[derive(Debug, Clone, Serialize)]
pub struct TaggingDiagnostics {
    pub total: usize,
    pub keyword_matches: usize,
    pub multi_scene_matches: usize,
    pub loose_matches: usize,
    pub other_count: usize,
    /// Every retained tag counted, secondary tags included
    pub multi_label_counts: BTreeMap<Scenario, usize>,
    pub other_ratio: f64,
    pub other_warning_ratio: f64,
    pub warning: Option<DataQualityWarning>,
}

impl TaggingDiagnostics {
    fn new(other_warning_ratio: f64) -> Self {
        Self {
            total: 0,
            keyword_matches: 0,
            multi_scene_matches: 0,
            loose_matches: 0,
            other_count: 0,
            multi_label_counts: BTreeMap::new(),
            other_ratio: 0.0,
            other_warning_ratio,
            warning: None,
        }
    }

    fn record(&mut self, scene: &SceneMatch) {
        self.total += 1;
        match scene.strategy {
            MatchStrategy::Keyword => self.keyword_matches += 1,
            MatchStrategy::MultiScene => self.multi_scene_matches += 1,
            MatchStrategy::Loose => self.loose_matches += 1,
            MatchStrategy::Fallback => self.other_count += 1,
        }
        *self.multi_label_counts.entry(scene.primary).or_insert(0) += 1;
        if let Some(secondary) = scene.secondary {
            *self.multi_label_counts.entry(secondary).or_insert(0) += 1;
        }
    }

    fn finish(&mut self) {
        self.other_ratio = if self.total == 0 {
            0.0
        } else {
            self.other_count as f64 / self.total as f64
        };

        if self.other_ratio > self.other_warning_ratio {
            let warning = DataQualityWarning::HighOtherRatio {
                ratio: self.other_ratio,
                threshold: self.other_warning_ratio,
                other_count: self.other_count,
                total: self.total,
            };
            warn!("{}", warning);
            self.warning = Some(warning);
        } else {
            info!(
                "Other ratio: {:.1}% ({}/{})",
                self.other_ratio * 100.0,
                self.other_count,
                self.total
            );
        }
    }
}

/// Ordered matcher chain with an Other fallback
pub struct SceneTagger {
    chain: Vec<Box<dyn SceneMatcher>>,
    other_warning_ratio: f64,
}

impl SceneTagger {
    /// Standard chain: keyword, multi-scene, loose
    pub fn new(tie_margin: usize, other_warning_ratio: f64) -> Self {
        Self::with_chain(
            vec![
                Box::new(KeywordMatcher::new(tie_margin)),
                Box::new(MultiSceneMatcher::new(tie_margin)),
                Box::new(LooseMatcher::new()),
            ],
            other_warning_ratio,
        )
    }

    /// Custom chain, tried in the given order
    pub fn with_chain(chain: Vec<Box<dyn SceneMatcher>>, other_warning_ratio: f64) -> Self {
        Self {
            chain,
            other_warning_ratio,
        }
    }

    /// Names of the chain links, in order
    pub fn chain_names(&self) -> Vec<&'static str> {
        self.chain.iter().map(|matcher| matcher.name()).collect()
    }

    /// Classify one cleaned text
    pub fn tag_text(&self, text: &str) -> SceneMatch {
        if text.trim().is_empty() {
            return Self::fallback();
        }
        self.chain
            .iter()
            .find_map(|matcher| matcher.attempt(text))
            .unwrap_or_else(Self::fallback)
    }

    /// Tag every post in place and summarize
    pub fn tag_posts(&self, posts: &mut [Post]) -> TaggingDiagnostics {
        let mut diagnostics = TaggingDiagnostics::new(self.other_warning_ratio);

        for post in posts.iter_mut() {
            let scene = self.tag_text(&post.text);
            post.scene_tag = scene.primary;
            post.secondary_tag = scene.secondary;
            diagnostics.record(&scene);
        }
        diagnostics.finish();

        debug!(
            keyword = diagnostics.keyword_matches,
            multi = diagnostics.multi_scene_matches,
            loose = diagnostics.loose_matches,
            other = diagnostics.other_count,
            "Scenario tagging complete"
        );
        diagnostics
    }

    fn fallback() -> SceneMatch {
        SceneMatch {
            primary: Scenario::Other,
            secondary: None,
            hits: 0,
            strategy: MatchStrategy::Fallback,
        }
    }
}

impl Default for SceneTagger {
    fn default() -> Self {
        Self::new(DEFAULT_TIE_MARGIN, DEFAULT_OTHER_WARNING_RATIO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(texts: &[&str]) -> Vec<Post> {
        texts.iter().map(|t| Post::new(*t, 0, 0, 0)).collect()
    }

    #[test]
    fn test_empty_text_is_other() {
        let tagger = SceneTagger::default();
        let scene = tagger.tag_text("   ");
        assert_eq!(scene.primary, Scenario::Other);
        assert_eq!(scene.hits, 0);
        assert_eq!(scene.strategy, MatchStrategy::Fallback);
    }

    #[test]
    fn test_chain_order() {
        let tagger = SceneTagger::default();
        assert_eq!(
            tagger.chain_names(),
            vec!["KeywordMatcher", "MultiSceneMatcher", "LooseMatcher"]
        );
    }

    #[test]
    fn test_each_link_of_the_chain() {
        let tagger = SceneTagger::default();
        assert_eq!(tagger.tag_text("分手 复合 失恋").strategy, MatchStrategy::Keyword);
        assert_eq!(tagger.tag_text("面试 考研").strategy, MatchStrategy::MultiScene);
        assert_eq!(tagger.tag_text("我想吃饭").strategy, MatchStrategy::Loose);
        assert_eq!(tagger.tag_text("哈哈哈").strategy, MatchStrategy::Fallback);
    }

    #[test]
    fn test_tag_posts_sets_primary_and_secondary() {
        let tagger = SceneTagger::default();
        let mut posts = posts(&["面试 工作 考研", "分手 复合"]);
        tagger.tag_posts(&mut posts);

        assert_eq!(posts[0].scene_tag, Scenario::Career);
        assert_eq!(posts[0].secondary_tag, Some(Scenario::Academic));
        assert_eq!(posts[1].scene_tag, Scenario::Emotional);
        assert_eq!(posts[1].secondary_tag, None);
    }

    #[test]
    fn test_diagnostics_counts() {
        let tagger = SceneTagger::default();
        let mut posts = posts(&["分手 复合 失恋", "面试 考研", "我想吃饭", "哈哈哈", ""]);
        let diagnostics = tagger.tag_posts(&mut posts);

        assert_eq!(diagnostics.total, 5);
        assert_eq!(diagnostics.keyword_matches, 1);
        assert_eq!(diagnostics.multi_scene_matches, 1);
        assert_eq!(diagnostics.loose_matches, 1);
        assert_eq!(diagnostics.other_count, 2);
        assert!((diagnostics.other_ratio - 0.4).abs() < 1e-12);
        // Multi-label counts include the runner-up of the near-tie
        assert_eq!(diagnostics.multi_label_counts[&Scenario::Academic], 1);
        assert_eq!(diagnostics.multi_label_counts[&Scenario::Career], 1);
    }

    #[test]
    fn test_high_other_ratio_warning() {
        let tagger = SceneTagger::default();
        let mut posts = posts(&["哈哈哈", "嗯嗯", "分手"]);
        let diagnostics = tagger.tag_posts(&mut posts);

        match diagnostics.warning {
            Some(DataQualityWarning::HighOtherRatio {
                other_count, total, ..
            }) => {
                assert_eq!(other_count, 2);
                assert_eq!(total, 3);
            }
            other => panic!("expected HighOtherRatio warning, got {:?}", other),
        }
    }

    #[test]
    fn test_ratio_at_threshold_is_not_a_warning() {
        let tagger = SceneTagger::new(DEFAULT_TIE_MARGIN, 0.20);
        let mut posts = posts(&["哈哈哈", "分手", "考研", "面试 工作 简历", "运势"]);
        let diagnostics = tagger.tag_posts(&mut posts);
        assert_eq!(diagnostics.other_count, 1);
        assert!(diagnostics.warning.is_none());
    }

    #[test]
    fn test_custom_chain() {
        let tagger = SceneTagger::with_chain(vec![Box::new(LooseMatcher::new())], 0.5);
        let scene = tagger.tag_text("分手");
        // No full-keyword matcher in the chain; 分 is not a loose keyword either
        assert_eq!(scene.primary, Scenario::Other);
    }
}
