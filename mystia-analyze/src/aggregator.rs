//! Scenario Aggregator
//!
//! Groups annotated posts by primary `scene_tag` and produces the reporting
//! series:
//! - Distribution: count and proportion per scenario (every scenario listed,
//!   empty ones with zero count)
//! - Mean sentiment per scenario, ascending
//! - Mean dependence per scenario, descending, with rank and interpretation
//!
//! Means are only reported for scenarios that have posts.

use crate::extractors::SentimentTone;
use mystia_common::{Post, Scenario};
use serde::Serialize;
use std::collections::BTreeMap;

/// Share of the corpus tagged with one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioShare {
    pub scenario: Scenario,
    pub count: usize,
    pub proportion: f64,
}

/// Mean sentiment of one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentMean {
    pub scenario: Scenario,
    pub count: usize,
    pub mean: f64,
    pub tone: SentimentTone,
}

/// How a scenario's mean dependence compares with the others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DependenceLevel {
    Highest,
    Lowest,
    /// Positive index (above the corpus mean of 0)
    AboveAverage,
    BelowAverage,
}

/// One row of the descending dependence ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependenceRank {
    /// 1-based
    pub rank: usize,
    pub scenario: Scenario,
    pub count: usize,
    pub mean: f64,
    pub level: DependenceLevel,
}

/// All scenario-level reporting artifacts
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub total: usize,
    /// Sorted by count, descending
    pub distribution: Vec<ScenarioShare>,
    /// Sorted by mean, ascending
    pub sentiment_means: Vec<SentimentMean>,
    /// Sorted by mean, descending
    pub dependence_ranking: Vec<DependenceRank>,
}

impl ScenarioReport {
    /// Mean sentiment of a scenario, if it has posts
    pub fn sentiment_of(&self, scenario: Scenario) -> Option<f64> {
        self.sentiment_means
            .iter()
            .find(|row| row.scenario == scenario)
            .map(|row| row.mean)
    }

    /// Mean dependence of a scenario, if it has posts
    pub fn dependence_of(&self, scenario: Scenario) -> Option<f64> {
        self.dependence_ranking
            .iter()
            .find(|row| row.scenario == scenario)
            .map(|row| row.mean)
    }

    /// Scenario with the highest mean dependence
    pub fn most_dependent(&self) -> Option<Scenario> {
        self.dependence_ranking.first().map(|row| row.scenario)
    }
}

/// (count, sum) per scenario for one numeric column
fn group_sums<F>(posts: &[Post], value: F) -> BTreeMap<Scenario, (usize, f64)>
where
    F: Fn(&Post) -> Option<f64>,
{
    let mut groups: BTreeMap<Scenario, (usize, f64)> = BTreeMap::new();
    for post in posts {
        if let Some(v) = value(post) {
            let entry = groups.entry(post.scene_tag).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += v;
        }
    }
    groups
}

/// Build every reporting series from the annotated corpus
pub fn aggregate(posts: &[Post]) -> ScenarioReport {
    let total = posts.len();

    let mut counts: BTreeMap<Scenario, usize> = Scenario::ALL.into_iter().map(|s| (s, 0)).collect();
    for post in posts {
        *counts.entry(post.scene_tag).or_insert(0) += 1;
    }
    let mut distribution: Vec<ScenarioShare> = counts
        .into_iter()
        .map(|(scenario, count)| ScenarioShare {
            scenario,
            count,
            proportion: if total == 0 { 0.0 } else { count as f64 / total as f64 },
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count));

    let mut sentiment_means: Vec<SentimentMean> = group_sums(posts, |p| Some(p.sentiment_score as f64))
        .into_iter()
        .map(|(scenario, (count, sum))| {
            let mean = sum / count as f64;
            SentimentMean {
                scenario,
                count,
                mean,
                tone: SentimentTone::of(mean),
            }
        })
        .collect();
    sentiment_means.sort_by(|a, b| a.mean.total_cmp(&b.mean));

    let mut dependence: Vec<(Scenario, usize, f64)> = group_sums(posts, |p| p.depend_index)
        .into_iter()
        .map(|(scenario, (count, sum))| (scenario, count, sum / count as f64))
        .collect();
    dependence.sort_by(|a, b| b.2.total_cmp(&a.2));

    let max = dependence.first().map(|row| row.2);
    let min = dependence.last().map(|row| row.2);
    let dependence_ranking = dependence
        .into_iter()
        .enumerate()
        .map(|(i, (scenario, count, mean))| {
            let level = if Some(mean) == max {
                DependenceLevel::Highest
            } else if Some(mean) == min {
                DependenceLevel::Lowest
            } else if mean > 0.0 {
                DependenceLevel::AboveAverage
            } else {
                DependenceLevel::BelowAverage
            };
            DependenceRank {
                rank: i + 1,
                scenario,
                count,
                mean,
                level,
            }
        })
        .collect();

    ScenarioReport {
        total,
        distribution,
        sentiment_means,
        dependence_ranking,
    }
}
