//! K-means: Lloyd's algorithm with k-means++ seeding.
//!
//! # The Algorithm
//!
//! 1. **Seeding (k-means++, Arthur & Vassilvitskii 2007)**: the first centroid is
//!    a point drawn uniformly. Each further centroid is drawn with probability
//!    proportional to the squared distance from a point to its nearest chosen
//!    centroid. Far-away points are likely picks, so initial centroids spread out.
//!
//! 2. **Lloyd iteration**: assign every point to its nearest centroid, then move
//!    each centroid to the mean of its members. Repeat until no assignment
//!    changes or the iteration cap is hit.
//!
//! ## Determinism
//!
//! All randomness comes from a [`StdRng`] seeded with [`Kmeans::with_seed`]. For a
//! fixed seed, input order and `k` the groups and assignments are bit-identical
//! across runs.
//!
//! ## Tie-breaking
//!
//! - Assignment: the lower-indexed centroid wins equal distances.
//! - Seeding: with threshold `t` drawn in `[0, total)`, the first point whose
//!   running cumulative weight reaches `t` is picked.
//!
//! ## Empty clusters
//!
//! A centroid that loses all its members keeps its previous coordinates. There
//! is no re-seeding.
//!
//! ## Complexity
//!
//! - Seeding: O(k·n)
//! - Each Lloyd round: O(k·n)

use super::classify::nearest_centroid;
use super::group::{Group, Palette};
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::geometry::{Coord, Point};
use rand::prelude::*;
use tracing::{debug, warn};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Iteration cap used when none is configured.
pub const DEFAULT_MAX_ITER: usize = 300;

/// K-means clusterer.
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    max_iter: usize,
    seed: u64,
    palette: Palette,
}

/// Outcome of a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    /// One group per final centroid, in centroid-creation order.
    pub groups: Vec<Group>,
    /// Number of Lloyd rounds performed (including the final, unchanged one).
    pub iterations: usize,
    /// Whether assignments stabilised before the iteration cap.
    pub converged: bool,
}

impl Kmeans {
    /// Create a k-means clusterer for `k` groups.
    ///
    /// Defaults: `seed = 42`, `max_iter = 300`, default symbol palette.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            seed: DEFAULT_SEED,
            palette: Palette::default(),
        }
    }

    /// Set the maximum number of Lloyd rounds.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the seed of the k-means++ generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the palette group symbols are drawn from.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Run k-means over `points` and report convergence details.
    ///
    /// Every point's `group` is overwritten with its final assignment. An empty
    /// input yields no groups; `k` larger than the number of points is clamped.
    pub fn fit_report(&self, points: &mut [Point]) -> Result<KmeansFit> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        let n = points.len();
        if n == 0 {
            return Ok(KmeansFit {
                groups: Vec::new(),
                iterations: 0,
                converged: true,
            });
        }
        let k = self.k.min(n);

        let coords: Vec<Coord> = points.iter().map(Point::coord).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids: Vec<Coord> = kmeans_plus_plus(&coords, k, &mut rng)
            .into_iter()
            .map(|i| coords[i])
            .collect();

        // `None` until the first assignment, so round one always counts as a change.
        let mut labels: Vec<Option<usize>> = vec![None; n];
        let mut iterations = 0;
        let mut converged = false;

        for round in 0..self.max_iter {
            iterations = round + 1;

            let mut changed = false;
            for (label, &c) in labels.iter_mut().zip(&coords) {
                let best = nearest_centroid(c, centroids.iter().copied());
                if *label != best {
                    *label = best;
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }

            update_centroids(&coords, &labels, &mut centroids);
        }

        if converged {
            debug!(k, n, iterations, "k-means converged");
        } else {
            warn!(k, n, max_iter = self.max_iter, "k-means hit the iteration cap");
        }

        for (p, label) in points.iter_mut().zip(labels) {
            p.group = label;
        }

        let groups = centroids
            .into_iter()
            .enumerate()
            .map(|(i, c)| Group::new(i, c, &self.palette))
            .collect();

        Ok(KmeansFit {
            groups,
            iterations,
            converged,
        })
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Clustering for Kmeans {
    fn fit(&self, points: &mut [Point]) -> Result<Vec<Group>> {
        self.fit_report(points).map(|fit| fit.groups)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Indices of `k` initial centroids picked with k-means++ (`1 <= k <= coords.len()`).
fn kmeans_plus_plus(coords: &[Coord], k: usize, rng: &mut impl Rng) -> Vec<usize> {
    let n = coords.len();
    let mut chosen = Vec::with_capacity(k);
    chosen.push(rng.random_range(0..n));

    // Squared distance from each point to its nearest chosen centroid.
    let mut weights = vec![f64::INFINITY; n];

    while chosen.len() < k {
        let newest = coords[chosen[chosen.len() - 1]];
        let mut total = 0.0;
        for (w, c) in weights.iter_mut().zip(coords) {
            *w = w.min(c.squared_distance(newest));
            total += *w;
        }

        // `random()` is in [0, 1), which keeps the threshold valid when total == 0.
        let threshold = rng.random::<f64>() * total;
        chosen.push(pick_weighted(&weights, threshold));
    }

    chosen
}

/// First index whose running cumulative weight reaches `threshold`.
///
/// Falls back to the last index if rounding keeps the sum below the threshold.
fn pick_weighted(weights: &[f64], threshold: f64) -> usize {
    let mut acc = 0.0;
    for (i, w) in weights.iter().enumerate() {
        acc += w;
        if acc >= threshold {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}

/// Move each centroid to the mean of its members; empty clusters stay put.
fn update_centroids(coords: &[Coord], labels: &[Option<usize>], centroids: &mut [Coord]) {
    let mut sums = vec![(0.0f64, 0.0f64, 0usize); centroids.len()];
    for (c, label) in coords.iter().zip(labels) {
        if let Some(g) = *label {
            let s = &mut sums[g];
            s.0 += c.x;
            s.1 += c.y;
            s.2 += 1;
        }
    }

    for (centroid, (sx, sy, count)) in centroids.iter_mut().zip(sums) {
        if count > 0 {
            let count = count as f64;
            *centroid = Coord::new(sx / count, sy / count);
        }
    }
}
