//! Dataset Quality Scorer
//!
//! Assesses whether a loaded corpus is large and varied enough for the
//! scenario statistics to be meaningful. Never blocks the pipeline; the
//! result is reported next to the analysis.
//!
//! # Scoring Algorithm
//! - **Volume** (weight: 0.4): record count against the 500-record target
//! - **User diversity** (weight: 0.3): distinct users against the 100-user
//!   target (full credit when the corpus carries no user data)
//! - **Keyword spread** (weight: 0.3): share of posts outside the five most
//!   frequent search keywords; full credit up to 70% concentration
//!   (full credit when the corpus carries no keyword data)
//!
//! # Status Determination
//! - Pass: overall ≥ 0.80
//! - Warning: overall ≥ 0.60
//! - Fail: overall < 0.60

use crate::types::{Validation, ValidationResult, ValidationStatus};
use mystia_common::Post;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

const VOLUME_WEIGHT: f64 = 0.4;
const USER_WEIGHT: f64 = 0.3;
const KEYWORD_WEIGHT: f64 = 0.3;
const TOP_KEYWORDS: usize = 5;

/// Corpus size and diversity validator
pub struct DatasetQualityScorer {
    /// Records needed for full volume credit
    min_records: usize,
    /// Distinct users needed for full diversity credit
    min_users: usize,
    /// Largest acceptable share of posts from the top-5 keywords
    max_top_keyword_share: f64,
    pass_threshold: f64,
    warning_threshold: f64,
}

impl DatasetQualityScorer {
    pub fn new() -> Self {
        Self {
            min_records: 500,
            min_users: 100,
            max_top_keyword_share: 0.70,
            pass_threshold: 0.80,
            warning_threshold: 0.60,
        }
    }

    fn score_corpus(&self, posts: &[Post]) -> ValidationResult {
        let mut issues = Vec::new();
        let total = posts.len();

        // Dimension 1: volume
        let volume_score = ratio(total, self.min_records);
        if total < self.min_records {
            issues.push(format!(
                "Only {} records (recommend at least {})",
                total, self.min_records
            ));
        }

        // Dimension 2: user diversity
        let users: HashSet<&str> = posts.iter().filter_map(|p| p.user.as_deref()).collect();
        let user_score = if users.is_empty() {
            1.0
        } else {
            if users.len() < self.min_users {
                issues.push(format!(
                    "Only {} distinct users (recommend at least {})",
                    users.len(),
                    self.min_users
                ));
            }
            ratio(users.len(), self.min_users)
        };

        // Dimension 3: keyword spread
        let mut keyword_counts: HashMap<&str, usize> = HashMap::new();
        for keyword in posts.iter().filter_map(|p| p.keyword.as_deref()) {
            *keyword_counts.entry(keyword).or_insert(0) += 1;
        }
        let top_keyword_share = top_share(&keyword_counts, total);
        let keyword_score = match top_keyword_share {
            None => 1.0,
            Some(share) if share > self.max_top_keyword_share => {
                issues.push(format!(
                    "Top {} keywords cover {:.1}% of posts (above {:.0}%)",
                    TOP_KEYWORDS,
                    share * 100.0,
                    self.max_top_keyword_share * 100.0
                ));
                ((1.0 - share) / (1.0 - self.max_top_keyword_share)).clamp(0.0, 1.0)
            }
            Some(_) => 1.0,
        };

        let overall_score =
            volume_score * VOLUME_WEIGHT + user_score * USER_WEIGHT + keyword_score * KEYWORD_WEIGHT;

        let status = if overall_score >= self.pass_threshold {
            ValidationStatus::Pass
        } else if overall_score >= self.warning_threshold {
            ValidationStatus::Warning
        } else {
            ValidationStatus::Fail
        };

        for issue in &issues {
            warn!("Dataset quality: {}", issue);
        }
        debug!(
            status = ?status,
            overall = overall_score,
            volume = volume_score,
            users = user_score,
            keywords = keyword_score,
            "Dataset quality scoring complete"
        );

        let mean = |f: fn(&Post) -> u64| {
            if total == 0 {
                0.0
            } else {
                posts.iter().map(|p| f(p) as f64).sum::<f64>() / total as f64
            }
        };
        let engaged = posts
            .iter()
            .filter(|p| p.reposts_count > 0 || p.comments_count > 0 || p.attitudes_count > 0)
            .count();

        let report = json!({
            "validator": "DatasetQualityScorer",
            "overall_score": overall_score,
            "status": format!("{:?}", status),
            "record_count": total,
            "distinct_users": users.len(),
            "distinct_keywords": keyword_counts.len(),
            "mean_reposts": mean(|p| p.reposts_count),
            "mean_comments": mean(|p| p.comments_count),
            "mean_likes": mean(|p| p.attitudes_count),
            "interaction_share": if total == 0 { 0.0 } else { engaged as f64 / total as f64 },
            "top_keyword_share": top_keyword_share,
            "dimensions": {
                "volume": { "score": volume_score, "weight": VOLUME_WEIGHT },
                "user_diversity": { "score": user_score, "weight": USER_WEIGHT },
                "keyword_spread": { "score": keyword_score, "weight": KEYWORD_WEIGHT },
            },
            "thresholds": {
                "pass": self.pass_threshold,
                "warning": self.warning_threshold,
                "min_records": self.min_records,
                "min_users": self.min_users,
                "max_top_keyword_share": self.max_top_keyword_share,
            }
        });

        ValidationResult {
            status,
            score: overall_score,
            issues,
            report,
        }
    }
}

impl Default for DatasetQualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Validation for DatasetQualityScorer {
    type Input = [Post];

    fn name(&self) -> &'static str {
        "DatasetQualityScorer"
    }

    fn validate(&self, input: &Self::Input) -> ValidationResult {
        debug!(records = input.len(), "Scoring dataset quality");
        self.score_corpus(input)
    }
}

/// `value / target`, capped at 1 (a zero target is always met)
fn ratio(value: usize, target: usize) -> f64 {
    if target == 0 {
        1.0
    } else {
        (value as f64 / target as f64).min(1.0)
    }
}

/// Share of all posts carried by the most frequent keywords
fn top_share(counts: &HashMap<&str, usize>, total: usize) -> Option<f64> {
    if counts.is_empty() || total == 0 {
        return None;
    }
    let mut sorted: Vec<usize> = counts.values().copied().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let top: usize = sorted.iter().take(TOP_KEYWORDS).sum();
    Some(top as f64 / total as f64)
}
