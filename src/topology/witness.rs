//! Witness Complex Construction
//!
//! The witness complex builds simplices on landmarks only, using every cloud
//! point as a potential witness. Let D(w, v) be the distance from witness w
//! to landmark v.
//!
//! ## Modes
//!
//! - **Strict** (weak witness, relaxed by scale): w witnesses σ at scale s iff
//!   every vertex of σ is at most s farther from w than the nearest landmark
//!   outside σ:
//!
//!     r(σ) = min_w max(0, max_{v∈σ} D(w, v) − min_{u∉σ} D(w, u))
//!
//!   At s = 0 this is the weak witness complex: σ must consist of w's nearest
//!   landmarks. A simplex enters at t(σ) = max(r(σ), max over faces of t).
//!
//! - **Lazy**: with m_ν(w) the distance from w to its ν-th nearest landmark
//!   (m₀ = 0), an edge enters at
//!
//!     r(ab) = min_w max(0, max(D(w, a), D(w, b)) − m_ν(w))
//!
//!   and every higher simplex enters as soon as all its edges are present
//!   (flag closure), without consulting witnesses again. The offset is the
//!   same for every simplex dimension, which makes this mode coarser and
//!   much cheaper for large clouds.
//!
//! ## Discretization
//!
//! The scale range [0, R_max] is cut into `num_divisions` steps and every
//! admitted value is rounded up to the next grid point, so the filtration has
//! at most `num_divisions + 1` distinct values. Admission itself depends only
//! on the exact value, so refining the grid never drops a simplex.
//!
//! ## Reference
//!
//! de Silva & Carlsson (2004). "Topological estimation using witness
//! complexes". Eurographics Symposium on Point-Based Graphics.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Filtration, Simplex};
use crate::error::{Result, TdaError};
use crate::geometry::{DistanceMetric, PointCloud};
use crate::landmarks::LandmarkSet;

/// Relative slack when comparing exact values against grid points
const GRID_TOLERANCE: f64 = 1e-9;

/// Default ν for lazy witness edges
pub const DEFAULT_LAZY_NU: usize = 1;

/// Witness criterion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WitnessMode {
    #[default]
    Strict,
    Lazy,
}

impl fmt::Display for WitnessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WitnessMode::Strict => f.write_str("strict"),
            WitnessMode::Lazy => f.write_str("lazy"),
        }
    }
}

impl FromStr for WitnessMode {
    type Err = TdaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(WitnessMode::Strict),
            "lazy" => Ok(WitnessMode::Lazy),
            other => Err(TdaError::invalid(
                "mode",
                format!("unknown witness mode `{other}` (expected strict or lazy)"),
            )),
        }
    }
}

/// Witness-to-landmark distances with each witness's landmarks ranked
struct WitnessTable {
    /// (witnesses × landmarks)
    distances: Array2<f64>,
    /// (witnesses × landmarks); row w lists landmark positions by distance from w
    ranking: Array2<usize>,
}

impl WitnessTable {
    fn new<M: DistanceMetric + ?Sized>(
        cloud: &PointCloud,
        landmarks: &LandmarkSet,
        metric: &M,
    ) -> Self {
        let distances = metric.distances_to_subset(cloud, landmarks.indices());

        let mut ranking = Array2::zeros(distances.dim());
        ranking
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(distances.axis_iter(Axis(0)).into_par_iter())
            .for_each(|(mut out, row)| {
                let mut order: Vec<usize> = (0..row.len()).collect();
                order.sort_by(|&a, &b| row[a].total_cmp(&row[b]).then(a.cmp(&b)));
                for (slot, l) in out.iter_mut().zip(order) {
                    *slot = l;
                }
            });

        Self { distances, ranking }
    }

    /// Strict value r(σ); stops early once a witness certifies σ at 0
    fn weak_witness_value(&self, vertices: &[usize]) -> f64 {
        let mut best = f64::INFINITY;
        for (row, ranked) in self
            .distances
            .axis_iter(Axis(0))
            .zip(self.ranking.axis_iter(Axis(0)))
        {
            let reach = vertices.iter().map(|&v| row[v]).fold(0.0, f64::max);
            let outside = ranked
                .iter()
                .find(|&&l| vertices.binary_search(&l).is_err())
                .map(|&l| row[l])
                .unwrap_or(f64::INFINITY);
            let value = (reach - outside).max(0.0);
            if value < best {
                best = value;
                if best == 0.0 {
                    break;
                }
            }
        }
        best
    }

    /// Lazy edge value with the fixed ν-th nearest landmark offset
    fn offset_value(&self, vertices: &[usize], nu: usize) -> f64 {
        let nu = nu.min(self.ranking.ncols());
        let mut best = f64::INFINITY;
        for (row, ranked) in self
            .distances
            .axis_iter(Axis(0))
            .zip(self.ranking.axis_iter(Axis(0)))
        {
            let reach = vertices.iter().map(|&v| row[v]).fold(0.0, f64::max);
            let offset = if nu == 0 { 0.0 } else { row[ranked[nu - 1]] };
            let value = (reach - offset).max(0.0);
            if value < best {
                best = value;
                if best == 0.0 {
                    break;
                }
            }
        }
        best
    }
}

/// Builder for witness filtrations over a landmark set
#[derive(Debug, Clone, PartialEq)]
pub struct WitnessFiltrationBuilder {
    max_dimension: usize,
    max_filtration_value: f64,
    num_divisions: usize,
    mode: WitnessMode,
    lazy_nu: usize,
}

impl WitnessFiltrationBuilder {
    /// Create a builder
    ///
    /// # Arguments
    /// * `max_dimension` - Largest simplex dimension constructed
    /// * `max_filtration_value` - Upper end of the scale range
    /// * `num_divisions` - Number of grid steps over [0, max_filtration_value]
    /// * `mode` - Strict or lazy witness criterion
    pub fn new(
        max_dimension: usize,
        max_filtration_value: f64,
        num_divisions: usize,
        mode: WitnessMode,
    ) -> Result<Self> {
        if !max_filtration_value.is_finite() || max_filtration_value < 0.0 {
            return Err(TdaError::invalid(
                "max_filtration_value",
                format!("must be finite and non-negative, got {max_filtration_value}"),
            ));
        }
        if num_divisions < 1 {
            return Err(TdaError::invalid("num_divisions", "must be at least 1"));
        }
        Ok(Self {
            max_dimension,
            max_filtration_value,
            num_divisions,
            mode,
            lazy_nu: DEFAULT_LAZY_NU,
        })
    }

    /// Set ν, the nearest-landmark offset used for lazy edges
    pub fn with_lazy_nu(mut self, nu: usize) -> Self {
        self.lazy_nu = nu;
        self
    }

    /// Witness criterion in use
    pub fn mode(&self) -> WitnessMode {
        self.mode
    }

    /// Upper end of the scale range; no admitted simplex exceeds it
    pub fn max_filtration_value(&self) -> f64 {
        self.max_filtration_value
    }

    /// Number of grid steps over the scale range
    pub fn num_divisions(&self) -> usize {
        self.num_divisions
    }

    /// Grid point `step` of the discretized scale range
    pub fn grid_value(&self, step: usize) -> f64 {
        self.max_filtration_value * (step as f64) / (self.num_divisions as f64)
    }

    /// Slack for grid comparisons, proportional to the scale ceiling
    ///
    /// Zero when the ceiling is zero, so only exact zeros are admitted there.
    fn tolerance(&self) -> f64 {
        GRID_TOLERANCE * self.max_filtration_value
    }

    /// Round an exact value up to the grid, or `None` if out of range
    fn snap(&self, exact: f64) -> Option<f64> {
        if !self.admissible(exact) {
            return None;
        }
        if self.max_filtration_value == 0.0 {
            return Some(0.0);
        }
        let tolerance = self.tolerance();
        let step = self.max_filtration_value / self.num_divisions as f64;
        let index = ((exact - tolerance) / step).ceil().max(0.0) as usize;
        Some(self.grid_value(index.min(self.num_divisions)))
    }

    /// Build the witness filtration
    pub fn build<M: DistanceMetric + ?Sized>(
        &self,
        cloud: &PointCloud,
        landmarks: &LandmarkSet,
        metric: &M,
    ) -> Result<Filtration> {
        if landmarks.is_empty() {
            return Err(TdaError::invalid("landmarks", "landmark set is empty"));
        }
        if let Some(&bad) = landmarks.indices().iter().find(|&&i| i >= cloud.len()) {
            return Err(TdaError::invalid(
                "landmarks",
                format!("landmark index {bad} out of range for {} points", cloud.len()),
            ));
        }

        let n_landmarks = landmarks.len();
        let top_dimension = self.max_dimension.min(n_landmarks - 1);
        let table = WitnessTable::new(cloud, landmarks, metric);

        // Exact values per level; level k holds k-simplices sorted by vertices
        let mut levels: Vec<Vec<(Simplex, f64)>> = Vec::with_capacity(top_dimension + 1);
        levels.push((0..n_landmarks).map(|v| (Simplex::vertex(v), 0.0)).collect());

        if top_dimension >= 1 {
            levels.push(self.edges(&table, n_landmarks));
        }
        for k in 2..=top_dimension {
            let next = self.extend(&table, &levels[k - 1], &levels[1]);
            if next.is_empty() {
                break;
            }
            levels.push(next);
        }

        for (k, level) in levels.iter().enumerate() {
            debug!(dimension = k, simplices = level.len(), "witness level admitted");
        }

        let simplices: Vec<(Simplex, f64)> = levels
            .into_iter()
            .flatten()
            .filter_map(|(simplex, exact)| self.snap(exact).map(|value| (simplex, value)))
            .collect();

        let filtration = Filtration::from_simplices(simplices)?;
        info!(
            mode = %self.mode,
            landmarks = n_landmarks,
            witnesses = cloud.len(),
            simplices = filtration.len(),
            distinct_values = filtration.distinct_values().len(),
            "witness filtration built"
        );
        Ok(filtration)
    }

    fn edge_value(&self, table: &WitnessTable, edge: &[usize]) -> f64 {
        match self.mode {
            WitnessMode::Strict => table.weak_witness_value(edge),
            WitnessMode::Lazy => table.offset_value(edge, self.lazy_nu),
        }
    }

    fn admissible(&self, exact: f64) -> bool {
        exact <= self.max_filtration_value + self.tolerance()
    }

    /// All admissible landmark pairs
    fn edges(&self, table: &WitnessTable, n_landmarks: usize) -> Vec<(Simplex, f64)> {
        let mut edges: Vec<(Simplex, f64)> = (0..n_landmarks)
            .into_par_iter()
            .flat_map_iter(|a| {
                (a + 1..n_landmarks).filter_map(move |b| {
                    let exact = self.edge_value(table, &[a, b]);
                    self.admissible(exact)
                        .then(|| (Simplex::from_sorted(vec![a, b]), exact))
                })
            })
            .collect();
        edges.sort_by(|x, y| x.0.cmp(&y.0));
        edges
    }

    /// k-simplices whose (k-1)-faces were all admitted
    fn extend(
        &self,
        table: &WitnessTable,
        previous: &[(Simplex, f64)],
        edges: &[(Simplex, f64)],
    ) -> Vec<(Simplex, f64)> {
        let face_values: HashMap<&Simplex, f64> =
            previous.iter().map(|(s, value)| (s, *value)).collect();

        // Higher neighbours of each landmark in the admitted 1-skeleton
        let mut upper: HashMap<usize, Vec<usize>> = HashMap::new();
        for (edge, _) in edges {
            let v = edge.vertices();
            upper.entry(v[0]).or_default().push(v[1]);
        }
        let adjacency: HashSet<(usize, usize)> = edges
            .iter()
            .map(|(e, _)| (e.vertices()[0], e.vertices()[1]))
            .collect();

        let mode = self.mode;
        let mut admitted: Vec<(Simplex, f64)> = previous
            .par_iter()
            .flat_map_iter(|(base, _)| {
                let vertices = base.vertices();
                let last = vertices[vertices.len() - 1];
                let candidates = upper.get(&last).map(Vec::as_slice).unwrap_or(&[]);
                let face_values = &face_values;
                let adjacency = &adjacency;
                candidates.iter().filter_map(move |&v| {
                    if !vertices.iter().all(|&u| adjacency.contains(&(u, v))) {
                        return None;
                    }
                    let mut extended = vertices.to_vec();
                    extended.push(v);
                    let simplex = Simplex::from_sorted(extended);

                    let mut faces_max = 0.0_f64;
                    for face in simplex.faces() {
                        faces_max = faces_max.max(*face_values.get(&face)?);
                    }
                    let exact = match mode {
                        WitnessMode::Strict => {
                            faces_max.max(table.weak_witness_value(simplex.vertices()))
                        }
                        WitnessMode::Lazy => faces_max,
                    };
                    self.admissible(exact).then_some((simplex, exact))
                })
            })
            .collect();
        admitted.sort_by(|x, y| x.0.cmp(&y.0));
        admitted
    }
}

/// Build a witness filtration in one call
pub fn build_witness_filtration<M: DistanceMetric + ?Sized>(
    cloud: &PointCloud,
    landmarks: &LandmarkSet,
    metric: &M,
    max_dimension: usize,
    max_filtration_value: f64,
    num_divisions: usize,
    mode: WitnessMode,
) -> Result<Filtration> {
    WitnessFiltrationBuilder::new(max_dimension, max_filtration_value, num_divisions, mode)?
        .build(cloud, landmarks, metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Euclidean;
    use crate::landmarks::{LandmarkSelector, MaxMinSelector};
    use ndarray::array;

    fn unit_square() -> (PointCloud, LandmarkSet) {
        let cloud = PointCloud::new(array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).unwrap();
        let landmarks = MaxMinSelector::new().select(&cloud, &Euclidean, 4).unwrap();
        (cloud, landmarks)
    }

    fn value(f: &Filtration, landmarks: &LandmarkSet, cloud_vertices: &[usize]) -> Option<f64> {
        let positions: Vec<usize> = cloud_vertices
            .iter()
            .map(|c| (0..landmarks.len()).position(|p| landmarks.cloud_index(p) == Some(*c)).unwrap())
            .collect();
        f.value_of(&Simplex::new(positions).unwrap())
    }

    #[test]
    fn test_parameter_validation() {
        assert!(WitnessFiltrationBuilder::new(1, -1.0, 10, WitnessMode::Strict).is_err());
        assert!(WitnessFiltrationBuilder::new(1, f64::NAN, 10, WitnessMode::Strict).is_err());
        assert!(WitnessFiltrationBuilder::new(1, 1.0, 0, WitnessMode::Strict).is_err());
        assert!(WitnessFiltrationBuilder::new(0, 0.0, 1, WitnessMode::Lazy).is_ok());
    }

    #[test]
    fn test_snap_rounds_up_to_grid() {
        let b = WitnessFiltrationBuilder::new(1, 2.0, 4, WitnessMode::Strict).unwrap();
        assert_eq!(b.snap(0.0), Some(0.0));
        assert_eq!(b.snap(0.5), Some(0.5));
        assert_eq!(b.snap(0.51), Some(1.0));
        assert_eq!(b.snap(2.0), Some(2.0));
        assert_eq!(b.snap(2.1), None);
    }

    #[test]
    fn test_square_strict_values() {
        let (cloud, landmarks) = unit_square();
        let f = build_witness_filtration(&cloud, &landmarks, &Euclidean, 2, 2.0, 200, WitnessMode::Strict)
            .unwrap();
        // Each corner has its two neighbours among its nearest landmarks
        assert_eq!(value(&f, &landmarks, &[0, 1]), Some(0.0));
        // Diagonal: √2 − 1 from its own endpoint, rounded up to the 0.01 grid
        assert!((value(&f, &landmarks, &[0, 2]).unwrap() - 0.42).abs() < 1e-9);
        // Triangles wait for their diagonal
        assert!((value(&f, &landmarks, &[0, 1, 2]).unwrap() - 0.42).abs() < 1e-9);
        assert_eq!(f.count_by_dimension(), vec![4, 6, 4]);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_scale_ceiling_prunes_diagonals() {
        let (cloud, landmarks) = unit_square();
        let f = build_witness_filtration(&cloud, &landmarks, &Euclidean, 2, 0.3, 3, WitnessMode::Strict)
            .unwrap();
        assert_eq!(f.count_by_dimension(), vec![4, 4]);
        assert!(value(&f, &landmarks, &[0, 2]).is_none());
    }

    #[test]
    fn test_admission_independent_of_units() {
        let square = array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let counts: Vec<Vec<usize>> = [1.0, 1e-10]
            .iter()
            .map(|&unit| {
                let cloud = PointCloud::new(&square * unit).unwrap();
                let landmarks = MaxMinSelector::new().select(&cloud, &Euclidean, 4).unwrap();
                let builder = WitnessFiltrationBuilder::new(2, 0.3 * unit, 3, WitnessMode::Strict).unwrap();
                assert_eq!(builder.max_filtration_value(), 0.3 * unit);
                // diagonals sit at (√2 − 1)·unit, above the ceiling at every unit
                builder.build(&cloud, &landmarks, &Euclidean).unwrap().count_by_dimension()
            })
            .collect();
        assert_eq!(counts[0], vec![4, 4]);
        assert_eq!(counts[0], counts[1]);
    }

    #[test]
    fn test_zero_ceiling_compares_exactly() {
        let b = WitnessFiltrationBuilder::new(1, 0.0, 4, WitnessMode::Strict).unwrap();
        assert_eq!(b.snap(0.0), Some(0.0));
        assert_eq!(b.snap(1e-12), None);
        assert!(!b.admissible(1e-300));
    }

    #[test]
    fn test_strict_uses_nearest_outside_landmark() {
        let cloud = PointCloud::new(array![[0.0], [10.0], [20.0], [4.0]]).unwrap();
        let landmarks = MaxMinSelector::new().select(&cloud, &Euclidean, 3).unwrap();
        assert_eq!(landmarks.indices(), &[0, 2, 1]);
        let f = build_witness_filtration(&cloud, &landmarks, &Euclidean, 2, 20.0, 20, WitnessMode::Strict)
            .unwrap();
        // Neighbouring landmarks are weakly witnessed outright
        assert_eq!(value(&f, &landmarks, &[0, 1]), Some(0.0));
        // 0 and 20 always have 10 in between: every witness is 10 short
        assert_eq!(value(&f, &landmarks, &[0, 2]), Some(10.0));
        assert_eq!(value(&f, &landmarks, &[0, 1, 2]), Some(10.0));
    }

    #[test]
    fn test_lazy_is_flag_closure() {
        let (cloud, landmarks) = unit_square();
        let f = build_witness_filtration(&cloud, &landmarks, &Euclidean, 3, 2.0, 200, WitnessMode::Lazy)
            .unwrap();
        // ν = 1 and every witness is a landmark, so edges enter at their
        // smallest enclosing witness radius: 1 for sides and diagonals alike
        assert_eq!(value(&f, &landmarks, &[0, 2]), Some(1.0));
        assert_eq!(f.count_by_dimension(), vec![4, 6, 4, 1]);
        let tetra = Simplex::new(vec![0, 1, 2, 3]).unwrap();
        assert_eq!(f.value_of(&tetra), Some(1.0));
    }

    #[test]
    fn test_max_dimension_zero_gives_vertices() {
        let (cloud, landmarks) = unit_square();
        let f = build_witness_filtration(&cloud, &landmarks, &Euclidean, 0, 5.0, 10, WitnessMode::Strict)
            .unwrap();
        assert_eq!(f.len(), 4);
        assert!(f.iter().all(|e| e.value == 0.0));
    }

    #[test]
    fn test_lazy_witness_shortens_edge() {
        // Two landmarks at the ends, a witness halfway between them
        let cloud = PointCloud::new(array![[0.0], [4.0], [2.0]]).unwrap();
        let landmarks = MaxMinSelector::new().select(&cloud, &Euclidean, 2).unwrap();
        assert_eq!(landmarks.indices(), &[0, 1]);
        let edge = Simplex::new(vec![0, 1]).unwrap();

        // ν = 1: the midpoint sees both landmarks at 2 with m₁ = 2
        let lazy = build_witness_filtration(&cloud, &landmarks, &Euclidean, 1, 4.0, 4, WitnessMode::Lazy)
            .unwrap();
        assert_eq!(lazy.value_of(&edge), Some(0.0));

        // ν = 0: plain enclosing radius, 2 from the midpoint
        let plain = WitnessFiltrationBuilder::new(1, 4.0, 4, WitnessMode::Lazy)
            .unwrap()
            .with_lazy_nu(0)
            .build(&cloud, &landmarks, &Euclidean)
            .unwrap();
        assert_eq!(plain.value_of(&edge), Some(2.0));
    }

    #[test]
    fn test_zero_scale_keeps_only_free_simplices() {
        let (cloud, landmarks) = unit_square();
        let f = build_witness_filtration(&cloud, &landmarks, &Euclidean, 2, 0.0, 5, WitnessMode::Strict)
            .unwrap();
        assert_eq!(f.count_by_dimension(), vec![4, 4]);
        assert!(f.iter().all(|e| e.value == 0.0));
    }

    #[test]
    fn test_landmarks_from_other_cloud_rejected() {
        let (_, landmarks) = unit_square();
        let small = PointCloud::new(array![[0.0, 0.0]]).unwrap();
        let err = build_witness_filtration(&small, &landmarks, &Euclidean, 1, 1.0, 1, WitnessMode::Strict)
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidParameter");
    }
}
