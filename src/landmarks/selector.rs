//! Landmark Selection
//!
//! Landmarks are the vertices of the witness complex. The maxmin selector
//! performs greedy farthest-point sampling:
//!
//!   l₀ = seed,  lₖ₊₁ = argmax_x min_{i ≤ k} d(x, lᵢ)
//!
//! which spreads landmarks evenly over the cloud. The cover radius
//!
//!   R = max_x min_i d(x, lᵢ)
//!
//! is recorded as `max_landmark_distance`; it bounds the largest meaningful
//! filtration scale.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TdaError};
use crate::geometry::{DistanceMetric, PointCloud};

/// Ordered set of landmark indices into a point cloud
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    indices: Vec<usize>,
    max_landmark_distance: f64,
}

impl LandmarkSet {
    /// Landmark indices in selection order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of landmarks
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Maximum distance from any cloud point to its nearest landmark
    pub fn max_landmark_distance(&self) -> f64 {
        self.max_landmark_distance
    }

    /// Cloud index of the landmark at position `position`
    pub fn cloud_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }
}

/// Strategy for choosing landmarks
pub trait LandmarkSelector {
    /// Choose `count` landmarks from `cloud`
    fn select<M: DistanceMetric + ?Sized>(
        &self,
        cloud: &PointCloud,
        metric: &M,
        count: usize,
    ) -> Result<LandmarkSet>;
}

/// Greedy farthest-point (maxmin) sampling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxMinSelector {
    /// Index of the first landmark
    pub seed_index: usize,
}

impl MaxMinSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `seed_index` instead of point 0
    pub fn with_seed_index(seed_index: usize) -> Self {
        Self { seed_index }
    }
}

impl LandmarkSelector for MaxMinSelector {
    fn select<M: DistanceMetric + ?Sized>(
        &self,
        cloud: &PointCloud,
        metric: &M,
        count: usize,
    ) -> Result<LandmarkSet> {
        validate_count(cloud, count)?;
        let n = cloud.len();
        if self.seed_index >= n {
            return Err(TdaError::invalid(
                "seed_index",
                format!("index {} out of range for {n} points", self.seed_index),
            ));
        }

        let mut indices = Vec::with_capacity(count);
        let mut selected = vec![false; n];
        indices.push(self.seed_index);
        selected[self.seed_index] = true;

        // Minimum distance from every point to the landmarks chosen so far
        let mut min_dist = metric.distances_from(cloud, cloud.point(self.seed_index)).to_vec();

        for _ in 1..count {
            let next = farthest_unselected(&min_dist, &selected);
            indices.push(next);
            selected[next] = true;

            // The parallel update finishes before the next argmax
            let landmark = cloud.point(next);
            min_dist.par_iter_mut().enumerate().for_each(|(i, d)| {
                let candidate = metric.distance(cloud.point(i), landmark);
                if candidate < *d {
                    *d = candidate;
                }
            });
        }

        let max_landmark_distance = min_dist.iter().copied().fold(0.0, f64::max);
        debug!(
            landmarks = count,
            points = n,
            cover_radius = max_landmark_distance,
            "maxmin landmark selection finished"
        );

        Ok(LandmarkSet {
            indices,
            max_landmark_distance,
        })
    }
}

/// Uniformly random landmarks from a seeded generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSelector {
    pub seed: u64,
}

impl RandomSelector {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LandmarkSelector for RandomSelector {
    fn select<M: DistanceMetric + ?Sized>(
        &self,
        cloud: &PointCloud,
        metric: &M,
        count: usize,
    ) -> Result<LandmarkSet> {
        validate_count(cloud, count)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let indices = rand::seq::index::sample(&mut rng, cloud.len(), count).into_vec();

        let max_landmark_distance = cover_radius(cloud, metric, &indices);
        debug!(
            landmarks = count,
            points = cloud.len(),
            cover_radius = max_landmark_distance,
            "random landmark selection finished"
        );

        Ok(LandmarkSet {
            indices,
            max_landmark_distance,
        })
    }
}

/// Configurable landmark strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LandmarkStrategy {
    MaxMin {
        #[serde(default)]
        seed_index: usize,
    },
    Random {
        #[serde(default)]
        seed: u64,
    },
}

impl Default for LandmarkStrategy {
    fn default() -> Self {
        LandmarkStrategy::MaxMin { seed_index: 0 }
    }
}

impl LandmarkSelector for LandmarkStrategy {
    fn select<M: DistanceMetric + ?Sized>(
        &self,
        cloud: &PointCloud,
        metric: &M,
        count: usize,
    ) -> Result<LandmarkSet> {
        match *self {
            LandmarkStrategy::MaxMin { seed_index } => {
                MaxMinSelector::with_seed_index(seed_index).select(cloud, metric, count)
            }
            LandmarkStrategy::Random { seed } => {
                RandomSelector::new(seed).select(cloud, metric, count)
            }
        }
    }
}

fn validate_count(cloud: &PointCloud, count: usize) -> Result<()> {
    if cloud.is_empty() {
        return Err(TdaError::EmptyInput("cannot select landmarks from an empty cloud".into()));
    }
    if count == 0 {
        return Err(TdaError::invalid("num_landmarks", "must be at least 1"));
    }
    if count > cloud.len() {
        return Err(TdaError::invalid(
            "num_landmarks",
            format!("requested {count} landmarks from a cloud of {} points", cloud.len()),
        ));
    }
    Ok(())
}

/// Index of the largest value among unselected points, lowest index on ties
fn farthest_unselected(min_dist: &[f64], selected: &[bool]) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (i, (&d, &taken)) in min_dist.iter().zip(selected).enumerate() {
        if taken {
            continue;
        }
        match best {
            Some((_, best_d)) if d <= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    // count <= n guarantees an unselected point remains
    best.map(|(i, _)| i).unwrap_or(0)
}

fn cover_radius<M: DistanceMetric + ?Sized>(
    cloud: &PointCloud,
    metric: &M,
    landmarks: &[usize],
) -> f64 {
    (0..cloud.len())
        .into_par_iter()
        .map(|i| {
            landmarks
                .iter()
                .map(|&l| metric.distance(cloud.point(i), cloud.point(l)))
                .fold(f64::INFINITY, f64::min)
        })
        .reduce(|| 0.0, f64::max)
}
