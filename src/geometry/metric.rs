//! Distance Metrics
//!
//! A metric is a pure, stateless function on pairs of points. The bulk
//! helpers evaluate one point against the whole cloud (or the whole cloud
//! against a subset) in parallel; both landmark selection and witness
//! construction are expressed in terms of these vectorized calls.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayView1, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::PointCloud;
use crate::error::TdaError;

/// A distance function on points of equal dimension
///
/// Implementations must be symmetric, non-negative and zero exactly on equal
/// points.
pub trait DistanceMetric: Send + Sync {
    /// Distance between two points
    fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64;

    /// Distances from `point` to every point of the cloud
    fn distances_from(&self, cloud: &PointCloud, point: ArrayView1<'_, f64>) -> Array1<f64> {
        let distances: Vec<f64> = (0..cloud.len())
            .into_par_iter()
            .map(|i| self.distance(cloud.point(i), point))
            .collect();
        Array1::from_vec(distances)
    }

    /// Matrix of distances from every cloud point (rows) to the points at
    /// `subset` (columns)
    fn distances_to_subset(&self, cloud: &PointCloud, subset: &[usize]) -> Array2<f64> {
        let mut out = Array2::zeros((cloud.len(), subset.len()));
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i, mut row)| {
                let p = cloud.point(i);
                for (slot, &j) in row.iter_mut().zip(subset) {
                    *slot = self.distance(p, cloud.point(j));
                }
            });
        out
    }
}

/// Euclidean (L²) distance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

/// Manhattan (L¹) distance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl DistanceMetric for Manhattan {
    fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}

/// Chebyshev (L^∞) distance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chebyshev;

impl DistanceMetric for Chebyshev {
    fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }
}

/// Configurable choice among the built-in metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl DistanceMetric for Metric {
    fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        match self {
            Metric::Euclidean => Euclidean.distance(a, b),
            Metric::Manhattan => Manhattan.distance(a, b),
            Metric::Chebyshev => Chebyshev.distance(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Chebyshev => "chebyshev",
        };
        f.write_str(name)
    }
}

impl FromStr for Metric {
    type Err = TdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            "manhattan" | "l1" => Ok(Metric::Manhattan),
            "chebyshev" | "linf" => Ok(Metric::Chebyshev),
            other => Err(TdaError::invalid(
                "metric",
                format!("unknown metric `{other}` (expected euclidean, manhattan or chebyshev)"),
            )),
        }
    }
}
