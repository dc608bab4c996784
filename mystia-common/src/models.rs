//! Post and scenario model
//!
//! A `Post` is created by the loader with text and engagement counters only.
//! Each pipeline stage fills in its own annotation fields; `depend_index` and
//! `cluster` stay `None` until the corpus-level stages have run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision scenario a post is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scenario {
    #[serde(rename = "情感")]
    Emotional,
    #[serde(rename = "学业")]
    Academic,
    #[serde(rename = "职业")]
    Career,
    #[serde(rename = "日常")]
    Daily,
    #[serde(rename = "Other")]
    Other,
}

impl Scenario {
    /// Every scenario, in declaration order (ties resolve in this order)
    pub const ALL: [Scenario; 5] = [
        Scenario::Emotional,
        Scenario::Academic,
        Scenario::Career,
        Scenario::Daily,
        Scenario::Other,
    ];

    /// Scenarios that own a keyword set
    pub const KEYWORDED: [Scenario; 4] = [
        Scenario::Emotional,
        Scenario::Academic,
        Scenario::Career,
        Scenario::Daily,
    ];

    /// Tag label as stored on posts and in reports
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Emotional => "情感",
            Scenario::Academic => "学业",
            Scenario::Career => "职业",
            Scenario::Daily => "日常",
            Scenario::Other => "Other",
        }
    }

    /// English name used on chart axes and legends
    pub fn english_name(&self) -> &'static str {
        match self {
            Scenario::Emotional => "Emotion",
            Scenario::Academic => "Study",
            Scenario::Career => "Career",
            Scenario::Daily => "Daily",
            Scenario::Other => "Other",
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, Scenario::Other)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One social-media post and its pipeline annotations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Cleaned text content
    pub text: String,
    pub reposts_count: u64,
    pub comments_count: u64,
    pub attitudes_count: u64,
    /// Author handle, when the source records carry one
    pub user: Option<String>,
    /// Search keyword the post was collected under, when present
    pub keyword: Option<String>,

    /// Primary scenario (single best match)
    pub scene_tag: Scenario,
    /// Runner-up scenario for multi-scenario matches
    pub secondary_tag: Option<Scenario>,
    pub sentiment_score: i64,
    pub mystic_density: u64,
    pub interaction_score: f64,
    pub log_interaction: f64,
    /// Composite dependence index (corpus-level, set by the calculator)
    pub depend_index: Option<f64>,
    /// Cluster label (set by the clusterer)
    pub cluster: Option<usize>,
}

impl Post {
    /// Create an unannotated post
    pub fn new(
        text: impl Into<String>,
        reposts_count: u64,
        comments_count: u64,
        attitudes_count: u64,
    ) -> Self {
        Self {
            text: text.into(),
            reposts_count,
            comments_count,
            attitudes_count,
            user: None,
            keyword: None,
            scene_tag: Scenario::Other,
            secondary_tag: None,
            sentiment_score: 0,
            mystic_density: 0,
            interaction_score: 0.0,
            log_interaction: 0.0,
            depend_index: None,
            cluster: None,
        }
    }

    /// Multi-valued tag: primary plus runner-up, comma separated
    pub fn scene_tags(&self) -> String {
        match self.secondary_tag {
            Some(secondary) => format!("{},{}", self.scene_tag, secondary),
            None => self.scene_tag.to_string(),
        }
    }
}

/// Weighted engagement: reposts + 2 × comments + 0.5 × attitudes
pub fn interaction_score(reposts: u64, comments: u64, attitudes: u64) -> f64 {
    reposts as f64 + comments as f64 * 2.0 + attitudes as f64 * 0.5
}

/// log10(interaction + 1), the engagement axis used for clustering
pub fn log_interaction(interaction_score: f64) -> f64 {
    (interaction_score + 1.0).log10()
}
