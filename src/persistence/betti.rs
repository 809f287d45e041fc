//! Betti Numbers: Topological Invariants
//!
//! The k-th Betti number βₖ counts the number of k-dimensional
//! "holes" in a topological space:
//!
//! - β₀: Number of connected components
//! - β₁: Number of 1-dimensional loops/cycles
//! - β₂: Number of 2-dimensional voids/cavities
//!
//! Here they are read off a barcode: βₖ(t) is the number of k-dimensional
//! intervals with birth ≤ t < death.

use serde::Serialize;

use super::BarcodeCollection;

/// Betti numbers at a specific filtration value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BettiNumbers {
    /// `betti[k]` is βₖ
    pub betti: Vec<usize>,
    pub scale: f64,
}

impl BettiNumbers {
    /// Betti numbers of dimensions 0..=max_dimension at scale `t`
    pub fn at_scale(barcodes: &BarcodeCollection, max_dimension: usize, t: f64) -> Self {
        let betti = (0..=max_dimension).map(|d| barcodes.betti_at(d, t)).collect();
        Self { betti, scale: t }
    }

    /// βₖ, zero beyond the computed range
    pub fn get(&self, k: usize) -> usize {
        self.betti.get(k).copied().unwrap_or(0)
    }

    /// Total topological complexity
    pub fn total(&self) -> usize {
        self.betti.iter().sum()
    }

    /// Euler characteristic χ = Σ (-1)ᵏ βₖ
    pub fn euler_characteristic(&self) -> i64 {
        self.betti
            .iter()
            .enumerate()
            .map(|(k, &b)| if k % 2 == 0 { b as i64 } else { -(b as i64) })
            .sum()
    }
}

/// Betti curve: sequence of Betti numbers across filtration
#[derive(Debug, Clone, Serialize)]
pub struct BettiCurve {
    pub values: Vec<BettiNumbers>,
}

impl BettiCurve {
    /// Sample the barcode on `scales`
    pub fn compute(barcodes: &BarcodeCollection, max_dimension: usize, scales: &[f64]) -> Self {
        let values = scales
            .iter()
            .map(|&t| BettiNumbers::at_scale(barcodes, max_dimension, t))
            .collect();
        Self { values }
    }

    /// Sample on the uniform grid {i · max_scale / divisions : 0 ≤ i ≤ divisions}
    pub fn on_grid(
        barcodes: &BarcodeCollection,
        max_dimension: usize,
        max_scale: f64,
        divisions: usize,
    ) -> Self {
        let divisions = divisions.max(1);
        let scales: Vec<f64> = (0..=divisions)
            .map(|i| max_scale * i as f64 / divisions as f64)
            .collect();
        Self::compute(barcodes, max_dimension, &scales)
    }

    /// (scale, βₖ) pairs
    pub fn curve(&self, k: usize) -> Vec<(f64, usize)> {
        self.values.iter().map(|b| (b.scale, b.get(k))).collect()
    }

    /// Area under the βₖ curve (trapezoidal rule)
    pub fn integrated(&self, k: usize) -> f64 {
        self.values
            .windows(2)
            .map(|w| {
                let ds = w[1].scale - w[0].scale;
                ds * (w[0].get(k) + w[1].get(k)) as f64 / 2.0
            })
            .sum()
    }
}
