//! Geometry Module: Point Clouds and Metrics
//!
//! The input side of the pipeline:
//! - `PointCloud`: validated, immutable matrix of points
//! - `DistanceMetric`: pure distance functions with parallel bulk evaluation
//! - `datasets`: seeded samplers of shapes with known topology

mod point_cloud;
mod metric;
pub mod datasets;

pub use point_cloud::PointCloud;
pub use metric::{DistanceMetric, Euclidean, Manhattan, Chebyshev, Metric};
