//! Barcodes: Persistence Intervals Grouped by Dimension
//!
//! An interval [birth, death) records a homology class of dimension k that
//! appears at scale `birth` and becomes a boundary at scale `death`.
//! Essential classes never die and carry `death = ∞`.
//!
//! ## Summary Statistics
//!
//! - Total persistence: Σ (death − birth) over finite intervals
//! - Persistence entropy: Shannon entropy of normalized lifetimes
//!
//!   E = -Σᵢ pᵢ log(pᵢ),   pᵢ = ℓᵢ / Σⱼ ℓⱼ
//!
//! Reference: Atienza et al. (2019), "Persistent entropy for separating
//! topological features from noise in Vietoris-Rips complexes"

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One persistence interval [birth, death)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub dimension: usize,
    pub birth: f64,
    /// `f64::INFINITY` for essential classes (serialized as `null`)
    #[serde(serialize_with = "serialize_death", deserialize_with = "deserialize_death")]
    pub death: f64,
}

impl Interval {
    pub fn new(dimension: usize, birth: f64, death: f64) -> Self {
        Self { dimension, birth, death }
    }

    /// death − birth, infinite for essential classes
    pub fn persistence(&self) -> f64 {
        if self.death.is_infinite() {
            f64::INFINITY
        } else {
            self.death - self.birth
        }
    }

    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    /// Whether the class is alive at scale `t`
    pub fn contains(&self, t: f64) -> bool {
        self.birth <= t && t < self.death
    }
}

fn serialize_death<S: Serializer>(death: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if death.is_infinite() {
        serializer.serialize_none()
    } else {
        serializer.serialize_some(death)
    }
}

fn deserialize_death<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

/// All intervals of a persistence computation
///
/// Intervals are kept sorted by (dimension, birth, death) so that reports
/// are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarcodeCollection {
    intervals: Vec<Interval>,
}

impl BarcodeCollection {
    pub fn new(mut intervals: Vec<Interval>) -> Self {
        intervals.sort_by(|a, b| {
            a.dimension
                .cmp(&b.dimension)
                .then(a.birth.total_cmp(&b.birth))
                .then(a.death.total_cmp(&b.death))
        });
        Self { intervals }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    /// Dimensions that carry at least one interval, ascending
    pub fn dimensions(&self) -> Vec<usize> {
        let mut dims: Vec<usize> = self.intervals.iter().map(|i| i.dimension).collect();
        dims.dedup();
        dims
    }

    /// Intervals of dimension `d`
    pub fn dim(&self, d: usize) -> Vec<&Interval> {
        self.intervals.iter().filter(|i| i.dimension == d).collect()
    }

    /// Essential (infinite) intervals of dimension `d`
    pub fn essential(&self, d: usize) -> Vec<&Interval> {
        self.intervals
            .iter()
            .filter(|i| i.dimension == d && i.is_essential())
            .collect()
    }

    /// Finite intervals of dimension `d`
    pub fn finite(&self, d: usize) -> Vec<&Interval> {
        self.intervals
            .iter()
            .filter(|i| i.dimension == d && !i.is_essential())
            .collect()
    }

    /// Rank of H_d at scale `t`
    pub fn betti_at(&self, d: usize, t: f64) -> usize {
        self.intervals
            .iter()
            .filter(|i| i.dimension == d && i.contains(t))
            .count()
    }

    /// Sum of finite lifetimes in dimension `d`
    pub fn total_persistence(&self, d: usize) -> f64 {
        self.finite(d).iter().map(|i| i.persistence()).sum()
    }

    /// Persistence entropy of the finite intervals in dimension `d`
    pub fn persistence_entropy(&self, d: usize) -> f64 {
        let lifetimes: Vec<f64> = self
            .finite(d)
            .iter()
            .map(|i| i.persistence())
            .filter(|&p| p > 0.0)
            .collect();

        let total: f64 = lifetimes.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }

        lifetimes
            .iter()
            .map(|p| p / total)
            .filter(|&prob| prob > 0.0)
            .map(|prob| -prob * prob.ln())
            .sum()
    }

    /// Longest-lived finite interval in dimension `d`
    pub fn longest_finite(&self, d: usize) -> Option<&Interval> {
        self.intervals
            .iter()
            .filter(|i| i.dimension == d && !i.is_essential())
            .max_by(|a, b| a.persistence().total_cmp(&b.persistence()))
    }

    /// Copy keeping only intervals that live strictly longer than `min_persistence`
    pub fn filter_persistence(&self, min_persistence: f64) -> Self {
        Self {
            intervals: self
                .intervals
                .iter()
                .filter(|i| i.persistence() > min_persistence)
                .copied()
                .collect(),
        }
    }
}
