//! Synthetic Point Clouds with Known Topology
//!
//! Seeded samplers for the standard test shapes of topological data
//! analysis. Each shape has known Betti numbers, which makes the samples
//! useful for checking that the witness pipeline recovers the right
//! barcode:
//!
//! | Shape        | β₀ | β₁ | β₂ |
//! |--------------|----|----|----|
//! | circle       | 1  | 1  | 0  |
//! | figure eight | 1  | 2  | 0  |
//! | sphere S²    | 1  | 0  | 1  |
//! | torus T²     | 1  | 2  | 1  |
//!
//! Gaussian noise of standard deviation `noise` is added to every
//! coordinate. All samplers are deterministic for a given seed.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};
use std::f64::consts::PI;

use super::PointCloud;
use crate::error::{Result, TdaError};

fn noise_distribution(noise: f64) -> Result<Normal<f64>> {
    if !noise.is_finite() || noise < 0.0 {
        return Err(TdaError::invalid(
            "noise",
            format!("must be finite and non-negative, got {noise}"),
        ));
    }
    Normal::new(0.0, noise).map_err(|e| TdaError::invalid("noise", e.to_string()))
}

fn angle_distribution() -> Result<Uniform<f64>> {
    Uniform::new(0.0, 2.0 * PI).map_err(|e| TdaError::invalid("angle", e.to_string()))
}

fn require_points(n: usize) -> Result<()> {
    if n == 0 {
        return Err(TdaError::invalid("n_points", "must be at least 1"));
    }
    Ok(())
}

/// Points on a circle of the given radius in ℝ²
pub fn noisy_circle(n: usize, radius: f64, noise: f64, seed: u64) -> Result<PointCloud> {
    require_points(n)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let angle = angle_distribution()?;
    let jitter = noise_distribution(noise)?;

    let mut points = Array2::zeros((n, 2));
    for i in 0..n {
        let theta = angle.sample(&mut rng);
        points[[i, 0]] = radius * theta.cos() + jitter.sample(&mut rng);
        points[[i, 1]] = radius * theta.sin() + jitter.sample(&mut rng);
    }
    PointCloud::new(points)
}

/// Points on two unit circles touching at the origin (a wedge of two circles)
pub fn figure_eight(n: usize, noise: f64, seed: u64) -> Result<PointCloud> {
    require_points(n)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let angle = angle_distribution()?;
    let jitter = noise_distribution(noise)?;

    let mut points = Array2::zeros((n, 2));
    for i in 0..n {
        let theta = angle.sample(&mut rng);
        // Alternate lobes so both circles get the same share of points
        let center = if i % 2 == 0 { -1.0 } else { 1.0 };
        points[[i, 0]] = center + theta.cos() + jitter.sample(&mut rng);
        points[[i, 1]] = theta.sin() + jitter.sample(&mut rng);
    }
    PointCloud::new(points)
}

/// Points on the unit sphere S^(dim-1) ⊂ ℝ^dim
///
/// Uses normalized standard Gaussian vectors, which are uniform on the sphere.
pub fn noisy_sphere(n: usize, dim: usize, noise: f64, seed: u64) -> Result<PointCloud> {
    require_points(n)?;
    if dim < 2 {
        return Err(TdaError::invalid("dim", "sphere needs an ambient dimension of at least 2"));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let gaussian = noise_distribution(1.0)?;
    let jitter = noise_distribution(noise)?;

    let mut points = Array2::zeros((n, dim));
    for mut row in points.rows_mut() {
        loop {
            row.iter_mut().for_each(|x| *x = gaussian.sample(&mut rng));
            let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm > 1e-12 {
                row.iter_mut().for_each(|x| *x /= norm);
                break;
            }
        }
        row.iter_mut().for_each(|x| *x += jitter.sample(&mut rng));
    }
    PointCloud::new(points)
}

/// Points on a torus in ℝ³ with tube radius `minor` around a circle of
/// radius `major`
pub fn noisy_torus(
    n: usize,
    major: f64,
    minor: f64,
    noise: f64,
    seed: u64,
) -> Result<PointCloud> {
    require_points(n)?;
    if !(minor > 0.0 && major > minor) {
        return Err(TdaError::invalid(
            "minor",
            format!("need 0 < minor < major, got minor={minor}, major={major}"),
        ));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let angle = angle_distribution()?;
    let jitter = noise_distribution(noise)?;

    let mut points = Array2::zeros((n, 3));
    for i in 0..n {
        let u = angle.sample(&mut rng);
        let v = angle.sample(&mut rng);
        let ring = major + minor * v.cos();
        points[[i, 0]] = ring * u.cos() + jitter.sample(&mut rng);
        points[[i, 1]] = ring * u.sin() + jitter.sample(&mut rng);
        points[[i, 2]] = minor * v.sin() + jitter.sample(&mut rng);
    }
    PointCloud::new(points)
}
