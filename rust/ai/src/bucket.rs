//! K-means bucketing of feature vectors.
//!
//! Features are z-scored with the fitted mean and spread before distances are
//! taken, so card ranks do not drown out the ratio features. Centroids are
//! seeded with k-means++ and refined with Lloyd iterations.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AiError;

/// Clusters fitted for `samples` training points: one per ten, at least two.
pub fn cluster_count_for(samples: usize) -> usize {
    (samples / 10).max(2)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucketer {
    mean: Vec<f64>,
    scale: Vec<f64>,
    centroids: Vec<Vec<f64>>,
}

impl Bucketer {
    /// Fits `k` clusters (fewer if there are fewer distinct points).
    ///
    /// # Errors
    ///
    /// [`AiError::InvalidConfig`] for no samples, `k == 0`, or samples of
    /// differing width.
    pub fn fit<R: Rng + ?Sized>(
        samples: &[impl AsRef<[f64]>],
        k: usize,
        max_iter: usize,
        rng: &mut R,
    ) -> Result<Self, AiError> {
        let first = samples
            .first()
            .ok_or_else(|| AiError::InvalidConfig("no samples to cluster".into()))?;
        if k == 0 {
            return Err(AiError::InvalidConfig("cluster count must be positive".into()));
        }
        let dims = first.as_ref().len();
        if samples.iter().any(|s| s.as_ref().len() != dims) {
            return Err(AiError::InvalidConfig("samples differ in width".into()));
        }

        let n = samples.len() as f64;
        let mut mean = vec![0.0; dims];
        for s in samples {
            for (m, v) in mean.iter_mut().zip(s.as_ref()) {
                *m += v / n;
            }
        }
        let mut scale = vec![0.0; dims];
        for s in samples {
            for ((sc, v), m) in scale.iter_mut().zip(s.as_ref()).zip(&mean) {
                *sc += (v - m).powi(2) / n;
            }
        }
        for sc in &mut scale {
            *sc = if *sc > 1e-12 { sc.sqrt() } else { 1.0 };
        }

        let mut bucketer = Bucketer {
            mean,
            scale,
            centroids: Vec::new(),
        };
        let points: Vec<Vec<f64>> = samples
            .iter()
            .map(|s| bucketer.standardize(s.as_ref()))
            .collect();

        bucketer.centroids = seed_centroids(&points, k.min(points.len()), rng);
        let iterations = bucketer.refine(&points, max_iter);
        debug!(
            clusters = bucketer.centroids.len(),
            samples = points.len(),
            iterations,
            "k-means fitted"
        );
        Ok(bucketer)
    }

    /// Nearest centroid, lowest index on ties. `None` for a vector of the
    /// wrong width or with non-finite entries.
    pub fn predict(&self, features: &[f64]) -> Option<usize> {
        if features.len() != self.mean.len() || features.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let point = self.standardize(features);
        nearest(&self.centroids, &point).map(|(i, _)| i)
    }

    pub fn clusters(&self) -> usize {
        self.centroids.len()
    }

    pub fn dims(&self) -> usize {
        self.mean.len()
    }

    fn standardize(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }

    /// Lloyd iterations until assignments settle; returns the count run.
    fn refine(&mut self, points: &[Vec<f64>], max_iter: usize) -> usize {
        let k = self.centroids.len();
        let dims = self.mean.len();
        let mut assignment = vec![usize::MAX; points.len()];
        for iter in 0..max_iter {
            let mut changed = false;
            for (slot, p) in assignment.iter_mut().zip(points) {
                let best = nearest(&self.centroids, p).map_or(0, |(i, _)| i);
                if *slot != best {
                    *slot = best;
                    changed = true;
                }
            }
            if !changed {
                return iter;
            }
            let mut sums = vec![vec![0.0; dims]; k];
            let mut counts = vec![0usize; k];
            for (&c, p) in assignment.iter().zip(points) {
                counts[c] += 1;
                for (s, v) in sums[c].iter_mut().zip(p) {
                    *s += v;
                }
            }
            for ((centroid, sum), count) in self.centroids.iter_mut().zip(sums).zip(counts) {
                // an emptied cluster keeps its previous centre
                if count > 0 {
                    *centroid = sum.into_iter().map(|s| s / count as f64).collect();
                }
            }
        }
        max_iter
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(centroids: &[Vec<f64>], point: &[f64]) -> Option<(usize, f64)> {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| (i, squared_distance(c, point)))
        .fold(None, |best, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
}

/// k-means++ seeding: each new centre is drawn with probability
/// proportional to its squared distance from the closest existing one.
fn seed_centroids<R: Rng + ?Sized>(points: &[Vec<f64>], k: usize, rng: &mut R) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);
    if points.is_empty() || k == 0 {
        return centroids;
    }
    let first = rng.random_range(0..points.len());
    centroids.push(points[first].clone());
    let mut min_dist: Vec<f64> = points
        .iter()
        .map(|p| squared_distance(p, &points[first]))
        .collect();

    while centroids.len() < k {
        let next = match WeightedIndex::new(&min_dist) {
            Ok(dist) => dist.sample(rng),
            // every point already coincides with a centre
            Err(_) => break,
        };
        let centre = points[next].clone();
        for (d, p) in min_dist.iter_mut().zip(points) {
            *d = d.min(squared_distance(p, &centre));
        }
        centroids.push(centre);
    }
    centroids
}
