//! User Clusterer
//!
//! Partitions posts into `k` groups (default 3) with seeded k-means over two
//! standardized features:
//! - `log_interaction` = log10(interaction_score + 1)
//! - `depend_index`
//!
//! Initialization is k-means++ drawn from a `StdRng` seeded once per run, so
//! the same corpus always yields the same labels. The best of `n_init`
//! restarts (lowest inertia) is kept, and clusters are relabelled in
//! ascending order of their centroid's dependence, so cluster `k - 1` is the
//! most dependent group.
//!
//! Fewer distinct feature rows than `k` is a configuration error.

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::DataQualityWarning;
use mystia_common::models::log_interaction;
use mystia_common::{FeatureStats, Post, Standardizer};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

pub const DEFAULT_CLUSTER_COUNT: usize = 3;
pub const DEFAULT_CLUSTER_SEED: u64 = 42;

/// k-means parameters
#[derive(Debug, Clone, Serialize)]
pub struct KMeansConfig {
    pub k: usize,
    pub seed: u64,
    /// Independent k-means++ restarts
    pub n_init: usize,
    pub max_iter: usize,
    /// Convergence threshold on total squared centroid shift
    pub tolerance: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_CLUSTER_COUNT,
            seed: DEFAULT_CLUSTER_SEED,
            n_init: 10,
            max_iter: 300,
            tolerance: 1e-4,
        }
    }
}

/// Min/mean/max of one feature within a cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Range {
    fn of(values: &[f64]) -> Self {
        let stats = FeatureStats::gather(values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean: stats.mean,
            min: if values.is_empty() { 0.0 } else { min },
            max: if values.is_empty() { 0.0 } else { max },
        }
    }
}

/// Summary of one cluster in raw (unscaled) units
#[derive(Debug, Clone, Serialize)]
pub struct ClusterProfile {
    pub cluster: usize,
    pub size: usize,
    pub share: f64,
    pub log_interaction: Range,
    pub depend_index: Range,
    pub mean_interaction: f64,
    pub mean_mystic_density: f64,
    pub mean_sentiment: f64,
}

/// Result of one clustering run
#[derive(Debug, Clone, Serialize)]
pub struct ClusteringOutcome {
    pub config: KMeansConfig,
    /// Sum of squared distances to the assigned centroid (standardized space)
    pub inertia: f64,
    /// Lloyd iterations of the kept restart
    pub iterations: usize,
    /// Centroids in standardized space, `[log_interaction, depend_index]`
    pub centroids: Vec<[f64; 2]>,
    pub profiles: Vec<ClusterProfile>,
    pub log_interaction: Standardizer,
    pub depend_index: Standardizer,
    pub warnings: Vec<DataQualityWarning>,
}

/// One converged k-means run
struct Fit {
    centroids: Array2<f64>,
    labels: Vec<usize>,
    inertia: f64,
    iterations: usize,
}

/// Seeded k-means over standardized interaction and dependence
#[derive(Debug, Clone, Default)]
pub struct UserClusterer {
    config: KMeansConfig,
}

impl UserClusterer {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Annotate `log_interaction` and `cluster` on every post
    pub fn cluster(&self, posts: &mut [Post]) -> AnalysisResult<ClusteringOutcome> {
        let k = self.config.k;
        if k == 0 {
            return Err(AnalysisError::Configuration(
                "cluster count must be at least 1".to_string(),
            ));
        }

        let mut depend = Vec::with_capacity(posts.len());
        for post in posts.iter_mut() {
            post.log_interaction = log_interaction(post.interaction_score);
            let index = post.depend_index.ok_or_else(|| {
                AnalysisError::Input("dependence index must be computed before clustering".to_string())
            })?;
            depend.push(index);
        }
        let interaction: Vec<f64> = posts.iter().map(|p| p.log_interaction).collect();

        let (interaction_scaler, scaled_interaction) =
            Standardizer::fit_transform("log_interaction", &interaction);
        let (depend_scaler, scaled_depend) = Standardizer::fit_transform("depend_index", &depend);

        let features = Array2::from_shape_fn((posts.len(), 2), |(i, j)| {
            if j == 0 {
                scaled_interaction[i]
            } else {
                scaled_depend[i]
            }
        });

        let distinct = distinct_rows(&features);
        if distinct < k {
            return Err(AnalysisError::Configuration(format!(
                "cannot form {} clusters from {} distinct data point(s)",
                k, distinct
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut best: Option<Fit> = None;
        for _ in 0..self.config.n_init.max(1) {
            let fit = self.lloyd(&features, &mut rng);
            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }
        let fit = best.ok_or_else(|| AnalysisError::Configuration("no k-means run completed".to_string()))?;
        let fit = relabel_by_dependence(fit);

        for (post, label) in posts.iter_mut().zip(fit.labels.iter()) {
            post.cluster = Some(*label);
        }

        let profiles = profile_clusters(posts, k);
        for profile in &profiles {
            info!(
                cluster = profile.cluster,
                size = profile.size,
                mean_log_interaction = profile.log_interaction.mean,
                mean_depend_index = profile.depend_index.mean,
                "Cluster profile"
            );
        }
        debug!(inertia = fit.inertia, iterations = fit.iterations, "k-means converged");

        let warnings = [&interaction_scaler, &depend_scaler]
            .into_iter()
            .filter(|scaler| scaler.is_zero_variance())
            .map(|scaler| DataQualityWarning::ZeroVariance {
                feature: scaler.feature().to_string(),
            })
            .collect();

        Ok(ClusteringOutcome {
            config: self.config.clone(),
            inertia: fit.inertia,
            iterations: fit.iterations,
            centroids: fit
                .centroids
                .axis_iter(Axis(0))
                .map(|row| [row[0], row[1]])
                .collect(),
            profiles,
            log_interaction: interaction_scaler,
            depend_index: depend_scaler,
            warnings,
        })
    }

    /// One k-means++ initialization followed by Lloyd iterations
    fn lloyd(&self, features: &Array2<f64>, rng: &mut StdRng) -> Fit {
        let k = self.config.k;
        let mut centroids = kmeans_plus_plus(features, k, rng);
        let mut labels = vec![0usize; features.nrows()];
        let mut iterations = 0;

        for iter in 1..=self.config.max_iter {
            iterations = iter;
            for (i, row) in features.axis_iter(Axis(0)).enumerate() {
                labels[i] = nearest(&centroids, row).0;
            }

            let updated = recompute_centroids(features, &labels, &centroids);
            let shift: f64 = (&updated - &centroids).mapv(|d| d * d).sum();
            centroids = updated;
            if shift <= self.config.tolerance {
                break;
            }
        }

        // Final assignment against the converged centroids
        let mut inertia = 0.0;
        for (i, row) in features.axis_iter(Axis(0)).enumerate() {
            let (label, dist) = nearest(&centroids, row);
            labels[i] = label;
            inertia += dist;
        }

        Fit {
            centroids,
            labels,
            inertia,
            iterations,
        }
    }
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Index of the closest centroid (lowest index on ties) and its squared distance
fn nearest(centroids: &Array2<f64>, row: ArrayView1<f64>) -> (usize, f64) {
    centroids
        .axis_iter(Axis(0))
        .enumerate()
        .map(|(c, centroid)| (c, squared_distance(row, centroid)))
        .fold((0, f64::INFINITY), |best, cand| if cand.1 < best.1 { cand } else { best })
}

/// Count rows with distinct values (-0.0 and 0.0 are the same point)
fn distinct_rows(features: &Array2<f64>) -> usize {
    let normalize = |x: f64| if x == 0.0 { 0.0f64.to_bits() } else { x.to_bits() };
    features
        .axis_iter(Axis(0))
        .map(|row| (normalize(row[0]), normalize(row[1])))
        .collect::<HashSet<_>>()
        .len()
}

/// k-means++ seeding: first centre uniform, the rest weighted by D²
fn kmeans_plus_plus(features: &Array2<f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let n = features.nrows();
    let mut centroids = Array2::zeros((k, features.ncols()));
    centroids.row_mut(0).assign(&features.row(rng.gen_range(0..n)));

    let mut closest: Array1<f64> = features
        .axis_iter(Axis(0))
        .map(|row| squared_distance(row, centroids.row(0)))
        .collect();

    for c in 1..k {
        let total = closest.sum();
        let chosen = if total > 0.0 {
            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            closest
                .iter()
                .position(|d| {
                    cumulative += d;
                    cumulative > target
                })
                .unwrap_or(n - 1)
        } else {
            rng.gen_range(0..n)
        };
        centroids.row_mut(c).assign(&features.row(chosen));

        for (i, row) in features.axis_iter(Axis(0)).enumerate() {
            let d = squared_distance(row, centroids.row(c));
            if d < closest[i] {
                closest[i] = d;
            }
        }
    }
    centroids
}

/// Mean of each cluster's members; an emptied cluster takes the point
/// farthest from its current centroid
fn recompute_centroids(features: &Array2<f64>, labels: &[usize], previous: &Array2<f64>) -> Array2<f64> {
    let k = previous.nrows();
    let mut sums = Array2::<f64>::zeros(previous.raw_dim());
    let mut counts = vec![0usize; k];
    for (row, &label) in features.axis_iter(Axis(0)).zip(labels) {
        let mut target = sums.row_mut(label);
        target += &row;
        counts[label] += 1;
    }

    for c in 0..k {
        if counts[c] > 0 {
            let mut row = sums.row_mut(c);
            row /= counts[c] as f64;
        } else {
            let farthest = features
                .axis_iter(Axis(0))
                .zip(labels)
                .enumerate()
                .map(|(i, (row, &label))| (i, squared_distance(row, previous.row(label))))
                .fold((0, f64::NEG_INFINITY), |best, cand| if cand.1 > best.1 { cand } else { best })
                .0;
            sums.row_mut(c).assign(&features.row(farthest));
        }
    }
    sums
}

/// Renumber clusters by ascending centroid dependence
fn relabel_by_dependence(fit: Fit) -> Fit {
    let k = fit.centroids.nrows();
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| {
        fit.centroids[[a, 1]]
            .total_cmp(&fit.centroids[[b, 1]])
            .then(fit.centroids[[a, 0]].total_cmp(&fit.centroids[[b, 0]]))
    });

    let mut new_label = vec![0usize; k];
    for (new, &old) in order.iter().enumerate() {
        new_label[old] = new;
    }

    let centroids = fit.centroids.select(Axis(0), &order);
    let labels = fit.labels.iter().map(|&l| new_label[l]).collect();
    Fit {
        centroids,
        labels,
        ..fit
    }
}

fn profile_clusters(posts: &[Post], k: usize) -> Vec<ClusterProfile> {
    let total = posts.len();
    (0..k)
        .map(|cluster| {
            let members: Vec<&Post> = posts.iter().filter(|p| p.cluster == Some(cluster)).collect();
            let column = |f: &dyn Fn(&Post) -> f64| members.iter().map(|&p| f(p)).collect::<Vec<f64>>();

            let log_interaction = column(&|p| p.log_interaction);
            let depend = column(&|p| p.depend_index.unwrap_or(0.0));
            let interaction = column(&|p| p.interaction_score);
            let mystic = column(&|p| p.mystic_density as f64);
            let sentiment = column(&|p| p.sentiment_score as f64);

            ClusterProfile {
                cluster,
                size: members.len(),
                share: if total == 0 { 0.0 } else { members.len() as f64 / total as f64 },
                log_interaction: Range::of(&log_interaction),
                depend_index: Range::of(&depend),
                mean_interaction: FeatureStats::gather(&interaction).mean,
                mean_mystic_density: FeatureStats::gather(&mystic).mean,
                mean_sentiment: FeatureStats::gather(&sentiment).mean,
            }
        })
        .collect()
}
